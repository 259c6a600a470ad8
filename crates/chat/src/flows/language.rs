use super::preferences::PreferencesState;
use super::{FlowState, Input, Transition, classify};
use crate::locale::Language;
use crate::outcome::{ChatError, Outcome};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LanguageState {
    /// Entered from the preferences menu; Back returns there.
    pub from_preferences: bool,
}

impl FlowState for LanguageState {
    fn prompt(&self) -> Outcome {
        Outcome::LanguageMenu
    }
}

pub fn start(from_preferences: bool) -> Transition {
    Transition::prompt(LanguageState { from_preferences })
}

pub(crate) fn advance(state: LanguageState, text: &str) -> Transition {
    match classify(text) {
        Input::Cancel => Transition::idle(Outcome::Cancelled),
        Input::Back if state.from_preferences => Transition::prompt(PreferencesState::menu()),
        Input::Back => Transition::idle(Outcome::Cancelled),
        Input::Text(choice) => match Language::from_menu_choice(choice) {
            Some(language) => {
                tracing::info!(language = language.code(), "language changed");
                Transition::idle(Outcome::LanguageSet { language }).with_language(language)
            }
            None => Transition::reprompt(state, ChatError::InvalidSelection),
        },
        Input::Yes | Input::No => Transition::reprompt(state, ChatError::InvalidSelection),
    }
}
