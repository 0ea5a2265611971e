//! Registry entry types: classes, members, and modifiers.

mod class;
mod member;
mod modifiers;

pub use class::ClassEntry;
pub use member::{ConstructorEntry, FieldEntry, FieldSlot, MethodEntry};
pub use modifiers::Modifiers;
