use super::Message;

/// What a single completion call sends: prior turns followed by the new user
/// turn.
#[derive(Debug, Clone, PartialEq)]
pub struct Prompt {
    pub history: Vec<Message>,
    pub user: String,
}

impl Prompt {
    pub fn new(history: Vec<Message>, user: String) -> Self {
        Self { history, user }
    }
}
