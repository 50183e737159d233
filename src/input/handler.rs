use crate::app::AppState;
use crate::domain::{UiMode, View};
use crate::pomodoro::SessionKind;
use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// Handle keyboard input events. Returns `true` when the app should quit.
pub fn handle_key(app: &mut AppState, key: KeyEvent) -> Result<bool> {
    if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
        return Ok(true);
    }

    // No view takes input until someone is signed in
    if !app.session.is_logged_in() {
        return handle_login_mode(app, key);
    }

    match app.ui_mode {
        UiMode::Login => handle_login_mode(app, key),
        UiMode::Normal => handle_normal_mode(app, key),
        UiMode::AddingTask => handle_task_form_mode(app, key),
        UiMode::Searching => handle_search_mode(app, key),
        UiMode::ConfirmDelete => handle_confirm_mode(app, key),
        UiMode::EditingSettings => handle_settings_mode(app, key),
    }
}

/// Handle keys on the login screen
fn handle_login_mode(app: &mut AppState, key: KeyEvent) -> Result<bool> {
    match key.code {
        KeyCode::Esc => return Ok(true),
        KeyCode::Enter => app.submit_login(),
        KeyCode::Tab | KeyCode::BackTab | KeyCode::Up | KeyCode::Down => app.login_toggle_field(),
        KeyCode::Backspace => app.login_backspace(),
        KeyCode::Char(c) => app.login_add_char(c),
        _ => {}
    }
    Ok(false)
}

/// Handle keys in normal mode: global keys first, then the current view
fn handle_normal_mode(app: &mut AppState, key: KeyEvent) -> Result<bool> {
    match key.code {
        KeyCode::Char('q') => return Ok(true),

        // Tabs 1-6
        KeyCode::Char(c @ '1'..='6') => {
            let index = c as usize - '1' as usize;
            app.switch_tab(index);
            return Ok(false);
        }

        KeyCode::Char('L') => {
            app.logout();
            return Ok(false);
        }

        _ => {}
    }

    match app.view {
        View::Dashboard => handle_dashboard_keys(app, key),
        View::ProjectDetail => handle_project_detail_keys(app, key),
        View::Kanban => handle_kanban_keys(app, key),
        View::Todo => handle_todo_keys(app, key),
        View::Calendar => handle_calendar_keys(app, key),
        View::Timeline => handle_timeline_keys(app, key),
        View::Pomodoro => handle_pomodoro_keys(app, key),
    }
    Ok(false)
}

fn handle_dashboard_keys(app: &mut AppState, key: KeyEvent) {
    match key.code {
        KeyCode::Up | KeyCode::Char('k') => app.move_selection_up(),
        KeyCode::Down | KeyCode::Char('j') => app.move_selection_down(),
        KeyCode::Enter => app.open_selected_project(),
        _ => {}
    }
}

fn handle_project_detail_keys(app: &mut AppState, key: KeyEvent) {
    let step = i16::from(crate::app::PROGRESS_STEP);
    match key.code {
        KeyCode::Char('+') | KeyCode::Char('=') => app.adjust_progress(step),
        KeyCode::Char('-') | KeyCode::Char('_') => app.adjust_progress(-step),
        KeyCode::Char('s') => app.cycle_project_status(),
        KeyCode::Esc | KeyCode::Backspace => app.close_project_detail(),
        _ => {}
    }
}

fn handle_kanban_keys(app: &mut AppState, key: KeyEvent) {
    match key.code {
        KeyCode::Up | KeyCode::Char('k') => app.move_selection_up(),
        KeyCode::Down | KeyCode::Char('j') => app.move_selection_down(),

        // Focus another column
        KeyCode::Tab | KeyCode::Char('l') => app.kanban_column_right(),
        KeyCode::BackTab | KeyCode::Char('h') => app.kanban_column_left(),

        // Move the selected card
        KeyCode::Right | KeyCode::Char('>') => app.move_task_right(),
        KeyCode::Left | KeyCode::Char('<') => app.move_task_left(),

        KeyCode::Char('a') => app.start_add_task(),
        KeyCode::Char('x') | KeyCode::Delete => app.request_delete_selected(),
        _ => {}
    }
}

fn handle_todo_keys(app: &mut AppState, key: KeyEvent) {
    match key.code {
        KeyCode::Up | KeyCode::Char('k') => app.move_selection_up(),
        KeyCode::Down | KeyCode::Char('j') => app.move_selection_down(),
        KeyCode::Char(' ') | KeyCode::Enter => app.toggle_selected_complete(),
        KeyCode::Char('f') => app.cycle_todo_filter(),
        KeyCode::Char('/') => app.start_search(),
        KeyCode::Char('a') => app.start_add_task(),
        KeyCode::Char('x') | KeyCode::Delete => app.request_delete_selected(),
        KeyCode::Esc => app.end_search(true),
        _ => {}
    }
}

fn handle_calendar_keys(app: &mut AppState, key: KeyEvent) {
    match key.code {
        KeyCode::Left | KeyCode::Char('h') => app.move_calendar_day(-1),
        KeyCode::Right | KeyCode::Char('l') => app.move_calendar_day(1),
        KeyCode::Up | KeyCode::Char('k') => app.move_selection_up(),
        KeyCode::Down | KeyCode::Char('j') => app.move_selection_down(),
        KeyCode::Char('[') => app.shift_calendar_month(-1),
        KeyCode::Char(']') => app.shift_calendar_month(1),
        KeyCode::Char('t') => app.calendar_today(),
        _ => {}
    }
}

fn handle_timeline_keys(app: &mut AppState, key: KeyEvent) {
    match key.code {
        KeyCode::Up | KeyCode::Char('k') => app.move_selection_up(),
        KeyCode::Down | KeyCode::Char('j') => app.move_selection_down(),
        KeyCode::Char('r') => app.cycle_time_range(),
        KeyCode::Char('p') => app.cycle_project_filter(),
        _ => {}
    }
}

fn handle_pomodoro_keys(app: &mut AppState, key: KeyEvent) {
    match key.code {
        KeyCode::Enter | KeyCode::Char(' ') => app.toggle_pomodoro(),
        KeyCode::Char('r') => app.reset_pomodoro(),
        KeyCode::Char('s') => app.skip_pomodoro(),
        KeyCode::Char('w') => app.select_session(SessionKind::Work),
        KeyCode::Char('b') => app.select_session(SessionKind::ShortBreak),
        KeyCode::Char('l') => app.select_session(SessionKind::LongBreak),
        KeyCode::Char('o') => app.open_settings(),
        _ => {}
    }
}

/// Handle keys in the add-task form
fn handle_task_form_mode(app: &mut AppState, key: KeyEvent) -> Result<bool> {
    let on_choice_field = app
        .task_form
        .as_ref()
        .is_some_and(|f| (1..=3).contains(&f.editing_field));

    match key.code {
        KeyCode::Enter => app.submit_task_form(),
        KeyCode::Esc => app.cancel_task_form(),
        KeyCode::Tab | KeyCode::Down => app.task_form_next_field(),
        KeyCode::BackTab | KeyCode::Up => app.task_form_prev_field(),
        KeyCode::Left | KeyCode::Right => app.task_form_cycle_option(),
        KeyCode::Char(' ') if on_choice_field => app.task_form_cycle_option(),
        KeyCode::Backspace => app.task_form_backspace(),
        KeyCode::Char(c) => app.task_form_add_char(c),
        _ => {}
    }
    Ok(false)
}

/// Handle keys while typing a todo search
fn handle_search_mode(app: &mut AppState, key: KeyEvent) -> Result<bool> {
    match key.code {
        KeyCode::Enter => app.end_search(false),
        KeyCode::Esc => app.end_search(true),
        KeyCode::Backspace => app.search_backspace(),
        KeyCode::Char(c) => app.search_add_char(c),
        _ => {}
    }
    Ok(false)
}

/// Handle keys in the delete confirmation modal
fn handle_confirm_mode(app: &mut AppState, key: KeyEvent) -> Result<bool> {
    match key.code {
        KeyCode::Char('y') | KeyCode::Char('Y') | KeyCode::Enter => app.confirm_delete(),
        KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc => app.cancel_confirm(),
        _ => {}
    }
    Ok(false)
}

/// Handle keys in the Pomodoro settings form
fn handle_settings_mode(app: &mut AppState, key: KeyEvent) -> Result<bool> {
    match key.code {
        KeyCode::Enter => app.save_settings(),
        KeyCode::Esc => app.cancel_settings(),
        KeyCode::Tab | KeyCode::Down => app.settings_next_field(),
        KeyCode::Backspace => app.settings_backspace(),
        KeyCode::Char(c) => app.settings_add_char(c),
        _ => {}
    }
    Ok(false)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::domain::Status;
    use crate::seed::mock_store;
    use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

    fn create_test_app() -> AppState {
        let mut app = AppState::new(mock_store(), Config::default(), None);
        app.submit_login();
        app
    }

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::empty())
    }

    fn type_keys(app: &mut AppState, text: &str) {
        for c in text.chars() {
            handle_key(app, key(KeyCode::Char(c))).unwrap();
        }
    }

    #[test]
    fn test_login_flow() {
        let mut app = AppState::new(mock_store(), Config::default(), None);
        type_keys(&mut app, "somchai");
        handle_key(&mut app, key(KeyCode::Tab)).unwrap();
        type_keys(&mut app, "secret");
        assert_eq!(app.login_form.password, "secret");

        handle_key(&mut app, key(KeyCode::Enter)).unwrap();
        assert_eq!(app.ui_mode, UiMode::Normal);
        assert_eq!(app.session.current_user().unwrap().name, "somchai");
    }

    #[test]
    fn test_q_on_login_is_typed_not_quit() {
        let mut app = AppState::new(mock_store(), Config::default(), None);
        let should_quit = handle_key(&mut app, key(KeyCode::Char('q'))).unwrap();
        assert!(!should_quit);
        assert_eq!(app.login_form.username, "q");
    }

    #[test]
    fn test_handle_quit() {
        let mut app = create_test_app();
        assert!(handle_key(&mut app, key(KeyCode::Char('q'))).unwrap());

        let mut app = create_test_app();
        let ctrl_c = KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL);
        assert!(handle_key(&mut app, ctrl_c).unwrap());
    }

    #[test]
    fn test_number_keys_switch_views() {
        let mut app = create_test_app();
        handle_key(&mut app, key(KeyCode::Char('6'))).unwrap();
        assert_eq!(app.view, View::Pomodoro);
        handle_key(&mut app, key(KeyCode::Char('4'))).unwrap();
        assert_eq!(app.view, View::Todo);
    }

    #[test]
    fn test_keys_go_to_login_without_session() {
        let mut app = AppState::new(mock_store(), Config::default(), None);
        app.ui_mode = UiMode::Normal;

        assert!(!handle_key(&mut app, key(KeyCode::Char('3'))).unwrap());
        assert_eq!(app.view, View::Dashboard);
        assert_eq!(app.login_form.username, "3");
    }

    #[test]
    fn test_logout_key() {
        let mut app = create_test_app();
        handle_key(&mut app, key(KeyCode::Char('L'))).unwrap();
        assert_eq!(app.ui_mode, UiMode::Login);
    }

    #[test]
    fn test_dashboard_enter_opens_project() {
        let mut app = create_test_app();
        handle_key(&mut app, key(KeyCode::Down)).unwrap();
        handle_key(&mut app, key(KeyCode::Enter)).unwrap();
        assert_eq!(app.view, View::ProjectDetail);

        handle_key(&mut app, key(KeyCode::Char('+'))).unwrap();
        assert_eq!(app.store.project(2).unwrap().progress, 50);

        handle_key(&mut app, key(KeyCode::Esc)).unwrap();
        assert_eq!(app.view, View::Dashboard);
    }

    #[test]
    fn test_kanban_add_task() {
        let mut app = create_test_app();
        app.switch_view(View::Kanban);
        let initial_count = app.store.tasks().len();

        handle_key(&mut app, key(KeyCode::Char('a'))).unwrap();
        assert_eq!(app.ui_mode, UiMode::AddingTask);
        type_keys(&mut app, "New card");
        handle_key(&mut app, key(KeyCode::Enter)).unwrap();

        assert_eq!(app.store.tasks().len(), initial_count + 1);
        assert_eq!(app.ui_mode, UiMode::Normal);
        assert!(app.task_form.is_none());
        assert_eq!(app.store.tasks().last().unwrap().project_id, Some(1));
    }

    #[test]
    fn test_kanban_arrows_move_card() {
        let mut app = create_test_app();
        app.switch_view(View::Kanban);
        handle_key(&mut app, key(KeyCode::Tab)).unwrap();
        let id = app.selected_kanban_task().unwrap();

        handle_key(&mut app, key(KeyCode::Right)).unwrap();
        assert_eq!(app.store.task(id).unwrap().status, Status::Review);
    }

    #[test]
    fn test_todo_delete_with_confirmation() {
        let mut app = create_test_app();
        app.switch_view(View::Todo);
        let initial_count = app.store.tasks().len();

        handle_key(&mut app, key(KeyCode::Char('x'))).unwrap();
        assert_eq!(app.ui_mode, UiMode::ConfirmDelete);
        handle_key(&mut app, key(KeyCode::Char('n'))).unwrap();
        assert_eq!(app.store.tasks().len(), initial_count);

        handle_key(&mut app, key(KeyCode::Delete)).unwrap();
        handle_key(&mut app, key(KeyCode::Char('y'))).unwrap();
        assert_eq!(app.store.tasks().len(), initial_count - 1);
    }

    #[test]
    fn test_todo_search_mode() {
        let mut app = create_test_app();
        app.switch_view(View::Todo);
        handle_key(&mut app, key(KeyCode::Char('/'))).unwrap();
        assert_eq!(app.ui_mode, UiMode::Searching);

        // 'q' is search text here, not quit
        let should_quit = handle_key(&mut app, key(KeyCode::Char('q'))).unwrap();
        assert!(!should_quit);
        assert_eq!(app.todo_search, "q");

        handle_key(&mut app, key(KeyCode::Esc)).unwrap();
        assert_eq!(app.ui_mode, UiMode::Normal);
        assert!(app.todo_search.is_empty());
    }

    #[test]
    fn test_pomodoro_keys() {
        let mut app = create_test_app();
        app.switch_view(View::Pomodoro);

        handle_key(&mut app, key(KeyCode::Enter)).unwrap();
        assert!(app.pomodoro.is_running());
        handle_key(&mut app, key(KeyCode::Enter)).unwrap();
        assert!(!app.pomodoro.is_running());

        handle_key(&mut app, key(KeyCode::Char('l'))).unwrap();
        assert_eq!(app.pomodoro.kind(), SessionKind::LongBreak);
        assert_eq!(app.pomodoro.remaining_secs(), 15 * 60);

        handle_key(&mut app, key(KeyCode::Char('s'))).unwrap();
        assert_eq!(app.pomodoro.kind(), SessionKind::Work);

        handle_key(&mut app, key(KeyCode::Char('o'))).unwrap();
        assert_eq!(app.ui_mode, UiMode::EditingSettings);
        handle_key(&mut app, key(KeyCode::Esc)).unwrap();
        assert_eq!(app.ui_mode, UiMode::Normal);
    }
}
