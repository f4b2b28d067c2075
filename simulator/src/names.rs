use paynet::types::NodeId;

/// Source of the display names sent along with user registrations
pub trait DisplayNames {
    fn display_name(&mut self, id: NodeId) -> String;
}

/// Names every participant `user-<id>`
#[derive(Debug, Default, Clone, Copy)]
pub struct NumberedNames;

impl DisplayNames for NumberedNames {
    fn display_name(&mut self, id: NodeId) -> String {
        format!("user-{}", id)
    }
}

/// Hands out a fixed list of names in order, falling back to `user-<id>` when it runs out
#[derive(Debug, Default, Clone)]
pub struct NameList {
    names: std::collections::VecDeque<String>,
}

impl NameList {
    pub fn new<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            names: names.into_iter().map(Into::into).collect(),
        }
    }
}

impl DisplayNames for NameList {
    fn display_name(&mut self, id: NodeId) -> String {
        self.names
            .pop_front()
            .unwrap_or_else(|| NumberedNames.display_name(id))
    }
}
