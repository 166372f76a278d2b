//! # lcs-core
//!
//! Schema-driven interactive configuration engine for create-lcs:
//! - Schema document parsing (a practical subset of JSON Schema)
//! - Prompt derivation with dotted paths, section breadcrumbs and validators
//! - Sequential prompt sessions with conditional questions
//! - Materialization of flat answers into a nested, typed configuration
//!
//! # Example
//!
//! ```
//! use lcs_core::{derive_prompts, materialize, run_session, AcceptDefaults, SchemaNode};
//!
//! let schema = SchemaNode::from_json_str(r#"{
//!     "properties": {
//!         "aws": {
//!             "type": "object",
//!             "properties": {
//!                 "region": { "type": "string", "default": "us-east-1" }
//!             }
//!         }
//!     }
//! }"#).unwrap();
//!
//! let prompts = derive_prompts(&schema);
//! assert_eq!(prompts[0].path, "aws.region");
//!
//! let answers = run_session(&prompts, AcceptDefaults).unwrap();
//! let config = materialize(&answers, &schema);
//! assert_eq!(config["aws"]["region"], "us-east-1");
//! ```

pub mod answers;
pub mod error;
pub mod materialize;
pub mod prompt;
pub mod schema;
pub mod session;

pub use answers::Answers;
pub use error::{Error, Result};
pub use materialize::{materialize, ConfigObject};
pub use prompt::{derive_prompts, InitialValue, PromptDescriptor, QuestionKind, Validator};
pub use schema::{SchemaKind, SchemaNode};
pub use session::{run_session, AcceptDefaults, PromptBackend};
