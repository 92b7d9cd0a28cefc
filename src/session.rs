//! Screen navigation for the interactive front end.
//!
//! Two screens: `Home` asks for a city, `Search` shows weather and
//! trails for it. The only state carried between screens is the city.

use std::str::FromStr;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchState {
    pub city: String,
    pub popular_dismissed: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Screen {
    #[default]
    Home,
    Search(SearchState),
}

#[derive(Debug, Default)]
pub struct Session {
    screen: Screen,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn screen(&self) -> &Screen {
        &self.screen
    }

    pub fn city(&self) -> Option<&str> {
        match &self.screen {
            Screen::Search(state) => Some(&state.city),
            Screen::Home => None,
        }
    }

    /// Moves from Home to Search. Returns false, staying put, for blank
    /// input or when a city is already selected.
    pub fn enter_city(&mut self, input: &str) -> bool {
        let city = input.trim();
        if city.is_empty() || self.screen != Screen::Home {
            return false;
        }
        tracing::debug!("Selected city: {}", city);
        self.screen = Screen::Search(SearchState {
            city: city.to_string(),
            popular_dismissed: false,
        });
        true
    }

    pub fn dismiss_popular(&mut self) {
        if let Screen::Search(state) = &mut self.screen {
            state.popular_dismissed = true;
        }
    }

    pub fn show_popular(&mut self) {
        if let Screen::Search(state) = &mut self.screen {
            state.popular_dismissed = false;
        }
    }

    pub fn back_to_city_selection(&mut self) {
        self.screen = Screen::Home;
    }
}

/// Choices offered on the search screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchAction {
    Recommend,
    Weather,
    Popular,
    Dismiss,
    Back,
    Quit,
}

impl SearchAction {
    pub const MENU: &'static str =
        "[r] Get recommendations  [w] Weather  [p] Popular trails  [d] Dismiss and proceed to search  [b] Back to city selection  [q] Quit";
}

impl FromStr for SearchAction {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "r" | "recommend" | "recommendations" => Ok(Self::Recommend),
            "w" | "weather" => Ok(Self::Weather),
            "p" | "popular" => Ok(Self::Popular),
            "d" | "dismiss" => Ok(Self::Dismiss),
            "b" | "back" => Ok(Self::Back),
            "q" | "quit" | "exit" => Ok(Self::Quit),
            other => Err(format!("unknown choice '{other}'")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_on_home() {
        let session = Session::new();
        assert_eq!(session.screen(), &Screen::Home);
        assert_eq!(session.city(), None);
    }

    #[test]
    fn entering_a_city_opens_search() {
        let mut session = Session::new();
        assert!(session.enter_city("  Banff "));
        assert_eq!(session.city(), Some("Banff"));
    }

    #[test]
    fn blank_city_stays_home() {
        let mut session = Session::new();
        assert!(!session.enter_city("   "));
        assert_eq!(session.screen(), &Screen::Home);
    }

    #[test]
    fn city_cannot_change_without_going_back() {
        let mut session = Session::new();
        session.enter_city("Banff");
        assert!(!session.enter_city("Jasper"));
        assert_eq!(session.city(), Some("Banff"));

        session.back_to_city_selection();
        assert_eq!(session.city(), None);
        assert!(session.enter_city("Jasper"));
        assert_eq!(session.city(), Some("Jasper"));
    }

    #[test]
    fn dismissing_popular_trails_is_reversible() {
        let mut session = Session::new();
        session.enter_city("Banff");
        session.dismiss_popular();
        assert!(matches!(session.screen(), Screen::Search(s) if s.popular_dismissed));
        session.show_popular();
        assert!(matches!(session.screen(), Screen::Search(s) if !s.popular_dismissed));
    }

    #[test]
    fn dismiss_on_home_is_a_no_op() {
        let mut session = Session::new();
        session.dismiss_popular();
        assert_eq!(session.screen(), &Screen::Home);
    }

    #[test]
    fn actions_accept_letters_and_words() {
        assert_eq!("R".parse::<SearchAction>(), Ok(SearchAction::Recommend));
        assert_eq!(" back ".parse::<SearchAction>(), Ok(SearchAction::Back));
        assert_eq!("exit".parse::<SearchAction>(), Ok(SearchAction::Quit));
        assert!("x".parse::<SearchAction>().is_err());
    }
}
