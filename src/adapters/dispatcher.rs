use crate::domain::ports::Dispatcher;

/// What the dispatcher was asked to emit, in order.
#[derive(Debug, Clone, PartialEq)]
pub enum Utterance {
    Text(String),
    /// A named template to be rendered by the dialogue manager.
    Template(String),
}

/// Dispatcher that collects utterances for the caller to render, in the
/// order the handlers produced them.
#[derive(Debug, Default)]
pub struct CollectingDispatcher {
    messages: Vec<Utterance>,
}

impl CollectingDispatcher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn messages(&self) -> &[Utterance] {
        &self.messages
    }

    pub fn drain(&mut self) -> Vec<Utterance> {
        std::mem::take(&mut self.messages)
    }
}

impl Dispatcher for CollectingDispatcher {
    fn utter_text(&mut self, text: &str) {
        self.messages.push(Utterance::Text(text.to_string()));
    }

    fn utter_template(&mut self, template: &str) {
        self.messages.push(Utterance::Template(template.to_string()));
    }
}
