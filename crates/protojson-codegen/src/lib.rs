//! protojson-codegen - Java fragment generators for protobuf schemas
//!
//! Generates Java source fragments that protoc splices into the classes its
//! built-in Java generator produced:
//!
//! - **JSON codecs**: `parseFromJSON(org.json.JSONObject)` and `toJSON()` per message
//! - **Map accessors**: `getXAsMap()`, `getXKeys()`, `containsXKey()`, `getXValue()`
//!   for repeated key/value entry fields marked as maps
//! - **Flat export**: `toMap()` for messages made only of scalar and enum fields
//! - **HTTP stubs**: one abstract class per service with a stub per method
//!
//! # Architecture
//!
//! ```text
//! FileSpec
//!     ↓
//!  [Driver] ──→ class_scope:<message>  ← [MessageCodec] ← [FieldCodec]*
//!     │
//!     └────→ outer_class_scope         ← [ServiceCodec] ← [MethodCodec]* ← [PathTemplate]
//!     ↓
//!  InsertionSink
//! ```
//!
//! Codecs return their errors instead of stopping; the driver gathers them in a
//! [`GenerationReport`] so one pass reports every problem in the schema.
//!
//! # Usage
//!
//! ```rust
//! use protojson_codegen::{FragmentBuffer, generate_file};
//! use protojson_core::{FieldKind, FieldSpec, FileSpec, MessageSpec};
//!
//! let file = FileSpec {
//!     name: "acme/user.proto".into(),
//!     java_file: "com/acme/UserOuterClass.java".into(),
//!     messages: vec![MessageSpec {
//!         name: "User".into(),
//!         full_name: "acme.User".into(),
//!         class_name: "com.acme.UserOuterClass.User".into(),
//!         fields: vec![FieldSpec::singular("display_name", FieldKind::String)],
//!         nested: vec![],
//!     }],
//!     services: vec![],
//! };
//!
//! let mut sink = FragmentBuffer::new();
//! let report = generate_file(&file, &mut sink);
//!
//! assert!(report.is_success());
//! let fragment = sink.get("com/acme/UserOuterClass.java", "class_scope:acme.User").unwrap();
//! assert!(fragment.contains("json.put(\"displayName\", getDisplayName());"));
//! ```

pub mod driver;
pub mod field;
pub mod message;
pub mod method;
pub mod path;
pub mod printer;
pub mod service;
pub mod sink;

pub use driver::{GenerationReport, generate_file, generate_files};
pub use field::FieldCodec;
pub use message::MessageCodec;
pub use method::MethodCodec;
pub use path::{PathSegment, PathTemplate, PathTemplateError};
pub use printer::{Printer, Vars};
pub use service::ServiceCodec;
pub use sink::{Fragment, FragmentBuffer, InsertionSink, OUTER_CLASS_SCOPE, class_scope};
