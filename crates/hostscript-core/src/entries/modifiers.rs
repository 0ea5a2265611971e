//! Member and declaration modifiers.

use bitflags::bitflags;

bitflags! {
    /// Host access-control and dispatch modifiers on a member.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct Modifiers: u8 {
        const PUBLIC   = 1 << 0;
        const STATIC   = 1 << 1;
        const FINAL    = 1 << 2;
        const ABSTRACT = 1 << 3;
    }
}

impl Modifiers {
    pub fn is_public(self) -> bool {
        self.contains(Modifiers::PUBLIC)
    }

    pub fn is_static(self) -> bool {
        self.contains(Modifiers::STATIC)
    }

    pub fn is_abstract(self) -> bool {
        self.contains(Modifiers::ABSTRACT)
    }
}

impl Default for Modifiers {
    fn default() -> Self {
        Modifiers::PUBLIC
    }
}
