/// One classification flag of a node or edge.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Mark {
    Focal,
    Mentioned,
    Parent,
    Child,
    Incoming,
    Outgoing,
    Ignored,
    /// Presentation hint only; never affects membership.
    Animated,
}

impl Mark {
    pub const ALL: [Mark; 8] = [
        Mark::Focal,
        Mark::Mentioned,
        Mark::Parent,
        Mark::Child,
        Mark::Incoming,
        Mark::Outgoing,
        Mark::Ignored,
        Mark::Animated,
    ];

    const fn bit(self) -> u8 {
        1 << self as u8
    }

    pub fn label(self) -> &'static str {
        match self {
            Mark::Focal => "focal",
            Mark::Mentioned => "mentioned",
            Mark::Parent => "parent",
            Mark::Child => "child",
            Mark::Incoming => "incoming",
            Mark::Outgoing => "outgoing",
            Mark::Ignored => "ignored",
            Mark::Animated => "animated",
        }
    }
}

/// Bitset of [`Mark`]s. The empty set is the "none" classification.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Marks(u8);

impl Marks {
    pub const NONE: Marks = Marks(0);

    const POSITIVE: u8 = Mark::Mentioned.bit()
        | Mark::Parent.bit()
        | Mark::Child.bit()
        | Mark::Incoming.bit()
        | Mark::Outgoing.bit();

    pub fn contains(self, mark: Mark) -> bool {
        self.0 & mark.bit() != 0
    }

    pub fn insert(&mut self, mark: Mark) {
        self.0 |= mark.bit();
    }

    pub fn with(mut self, mark: Mark) -> Self {
        self.insert(mark);
        self
    }

    pub fn is_none(self) -> bool {
        self.0 == 0
    }

    /// Related to the focal node through the index.
    pub fn is_positive(self) -> bool {
        self.0 & Self::POSITIVE != 0
    }

    pub fn iter(self) -> impl Iterator<Item = Mark> {
        Mark::ALL.into_iter().filter(move |mark| self.contains(*mark))
    }
}

impl FromIterator<Mark> for Marks {
    fn from_iter<I: IntoIterator<Item = Mark>>(iter: I) -> Self {
        iter.into_iter().fold(Marks::NONE, Marks::with)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flags_are_independent() {
        let marks = Marks::NONE.with(Mark::Parent).with(Mark::Mentioned);

        assert!(marks.contains(Mark::Parent));
        assert!(marks.contains(Mark::Mentioned));
        assert!(!marks.contains(Mark::Child));
        assert!(marks.is_positive());
        assert_eq!(
            marks.iter().collect::<Vec<_>>(),
            vec![Mark::Mentioned, Mark::Parent]
        );
    }

    #[test]
    fn focal_ignored_and_animated_are_not_positive() {
        let marks = [Mark::Focal, Mark::Ignored, Mark::Animated]
            .into_iter()
            .collect::<Marks>();
        assert!(!marks.is_positive());
        assert!(!marks.is_none());
        assert!(Marks::default().is_none());
    }
}
