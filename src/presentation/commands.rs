use crate::domain::entities::SortKey;
use crate::domain::keybinding::{Action, Keybind};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use std::collections::HashMap;

pub struct CommandRegistry {
    display_bindings: HashMap<Action, KeyEvent>,
    input_bindings: Vec<(KeyEvent, Action)>,
}

impl Default for CommandRegistry {
    fn default() -> Self {
        let mut display_bindings = HashMap::new();
        let mut input_bindings = Vec::new();

        let mut register = |action: Action, key: KeyEvent, is_primary: bool| {
            if is_primary {
                display_bindings.insert(action, key);
            }
            input_bindings.push((key, action));
        };

        register(
            Action::Quit,
            KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL),
            true,
        );
        register(
            Action::Quit,
            KeyEvent::new(KeyCode::Char('q'), KeyModifiers::CONTROL),
            false,
        );
        register(
            Action::Reload,
            KeyEvent::new(KeyCode::Char('r'), KeyModifiers::CONTROL),
            true,
        );

        register(
            Action::FocusNext,
            KeyEvent::new(KeyCode::Tab, KeyModifiers::NONE),
            true,
        );
        register(
            Action::FocusPrevious,
            KeyEvent::new(KeyCode::BackTab, KeyModifiers::SHIFT),
            true,
        );
        register(
            Action::FocusPrevious,
            KeyEvent::new(KeyCode::BackTab, KeyModifiers::NONE),
            false,
        );
        register(
            Action::FocusForm,
            KeyEvent::new(KeyCode::Char('n'), KeyModifiers::CONTROL),
            true,
        );
        register(
            Action::FocusFilters,
            KeyEvent::new(KeyCode::Char('f'), KeyModifiers::CONTROL),
            true,
        );
        register(
            Action::FocusTable,
            KeyEvent::new(KeyCode::Char('t'), KeyModifiers::CONTROL),
            true,
        );

        register(
            Action::NavigateUp,
            KeyEvent::new(KeyCode::Up, KeyModifiers::NONE),
            true,
        );
        register(
            Action::NavigateUp,
            KeyEvent::new(KeyCode::Char('k'), KeyModifiers::NONE),
            false,
        );
        register(
            Action::NavigateDown,
            KeyEvent::new(KeyCode::Down, KeyModifiers::NONE),
            true,
        );
        register(
            Action::NavigateDown,
            KeyEvent::new(KeyCode::Char('j'), KeyModifiers::NONE),
            false,
        );
        register(
            Action::SelectFirst,
            KeyEvent::new(KeyCode::Home, KeyModifiers::NONE),
            true,
        );
        register(
            Action::SelectFirst,
            KeyEvent::new(KeyCode::Char('g'), KeyModifiers::NONE),
            false,
        );
        register(
            Action::SelectLast,
            KeyEvent::new(KeyCode::End, KeyModifiers::NONE),
            true,
        );
        register(
            Action::SelectLast,
            KeyEvent::new(KeyCode::Char('G'), KeyModifiers::SHIFT),
            false,
        );

        for key in SortKey::ALL {
            let digit = char::from_digit(u32::try_from(key.column() + 1).unwrap_or(0), 10)
                .unwrap_or('0');
            register(
                Action::SortBy(key),
                KeyEvent::new(KeyCode::Char(digit), KeyModifiers::NONE),
                true,
            );
        }

        register(
            Action::DeleteSelected,
            KeyEvent::new(KeyCode::Delete, KeyModifiers::NONE),
            true,
        );
        register(
            Action::DeleteSelected,
            KeyEvent::new(KeyCode::Char('d'), KeyModifiers::NONE),
            false,
        );

        register(
            Action::Submit,
            KeyEvent::new(KeyCode::Enter, KeyModifiers::NONE),
            true,
        );
        register(
            Action::ClearInput,
            KeyEvent::new(KeyCode::Char('u'), KeyModifiers::CONTROL),
            true,
        );
        register(
            Action::Cancel,
            KeyEvent::new(KeyCode::Esc, KeyModifiers::NONE),
            true,
        );

        Self {
            display_bindings,
            input_bindings,
        }
    }
}

impl CommandRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, action: Action) -> Option<KeyEvent> {
        self.display_bindings.get(&action).copied()
    }

    pub fn find_action(&self, key: KeyEvent) -> Option<Action> {
        self.input_bindings
            .iter()
            .find(|(k, _)| k.code == key.code && k.modifiers == key.modifiers)
            .map(|(_, a)| *a)
    }

    /// Builds display hints for the given actions, skipping unbound ones.
    pub fn keybinds(&self, actions: &[(Action, &'static str)]) -> Vec<Keybind> {
        actions
            .iter()
            .filter_map(|(action, label)| {
                self.get(*action)
                    .map(|key| Keybind::new(key, *action, *label))
            })
            .collect()
    }
}

pub trait HasCommands {
    fn get_commands(&self, registry: &CommandRegistry) -> Vec<Keybind>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    #[test_case(KeyCode::Char('1'), SortKey::FullName ; "one sorts by name")]
    #[test_case(KeyCode::Char('2'), SortKey::BirthDate ; "two sorts by birth date")]
    #[test_case(KeyCode::Char('3'), SortKey::StartYear ; "three sorts by study years")]
    #[test_case(KeyCode::Char('4'), SortKey::Faculty ; "four sorts by faculty")]
    fn test_digit_keys_sort(code: KeyCode, expected: SortKey) {
        let registry = CommandRegistry::new();
        let action = registry.find_action(KeyEvent::new(code, KeyModifiers::NONE));
        assert_eq!(action, Some(Action::SortBy(expected)));
    }

    #[test]
    fn test_back_tab_with_and_without_shift() {
        let registry = CommandRegistry::new();
        assert_eq!(
            registry.find_action(KeyEvent::new(KeyCode::BackTab, KeyModifiers::SHIFT)),
            Some(Action::FocusPrevious)
        );
        assert_eq!(
            registry.find_action(KeyEvent::new(KeyCode::BackTab, KeyModifiers::NONE)),
            Some(Action::FocusPrevious)
        );
    }

    #[test]
    fn test_modifiers_must_match() {
        let registry = CommandRegistry::new();
        assert_eq!(
            registry.find_action(KeyEvent::new(KeyCode::Char('r'), KeyModifiers::CONTROL)),
            Some(Action::Reload)
        );
        assert_eq!(
            registry.find_action(KeyEvent::new(KeyCode::Char('r'), KeyModifiers::NONE)),
            None
        );
    }

    #[test]
    fn test_display_binding_is_primary() {
        let registry = CommandRegistry::new();
        let key = registry.get(Action::DeleteSelected).unwrap();
        assert_eq!(key.code, KeyCode::Delete);
    }

    #[test]
    fn test_keybinds_skip_unbound_actions() {
        let registry = CommandRegistry::new();
        let binds = registry.keybinds(&[(Action::Reload, "Reload"), (Action::Submit, "Add")]);
        assert_eq!(binds.len(), 2);
        assert_eq!(binds[0].label, "Reload");
    }
}
