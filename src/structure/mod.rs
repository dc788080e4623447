// Mon Jan 19 2026 - Alex

pub mod alignment;
pub mod builder;
pub mod error;
pub mod layout;
pub mod member;
pub mod packing;
pub mod serializer;
pub mod type_info;
pub mod validator;

pub use alignment::{AlignmentTable, TargetArch};
pub use builder::StructLayoutBuilder;
pub use error::StructureError;
pub use layout::StructLayout;
pub use member::MemberLayout;
pub use packing::{Packing, PackingClassifier};
pub use serializer::{load_layouts, parse_layouts, LayoutSet, RejectedRecord};
pub use type_info::TypeKind;
pub use validator::StructureValidator;
