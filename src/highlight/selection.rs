/// What a [`Selection::toggle`] did.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SelectionChange {
    Selected(String),
    Cleared,
}

/// At most one focal node.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Selection {
    focal: Option<String>,
}

impl Selection {
    pub fn focal(&self) -> Option<&str> {
        self.focal.as_deref()
    }

    /// Selecting the current focal node clears it.
    pub fn toggle(&mut self, id: &str) -> SelectionChange {
        if self.focal.as_deref() == Some(id) {
            self.focal = None;
            SelectionChange::Cleared
        } else {
            self.focal = Some(id.to_owned());
            SelectionChange::Selected(id.to_owned())
        }
    }

    pub fn clear(&mut self) {
        self.focal = None;
    }
}
