mod common;

use chrono::{TimeZone, Utc};
use common::fixture;
use hoquei_fixtures::model::filter::FilterDefinition;
use hoquei_fixtures::model::fixture::FixtureRecord;
use hoquei_fixtures::session::{Command, Effect, PAGE_LINES, Session, View};

fn filters() -> Vec<FilterDefinition> {
    vec![
        FilterDefinition { name: "Seniors".into(), search_text: None, category: Some("senior".into()) },
        FilterDefinition { name: "Vic".into(), search_text: Some("vic".into()), category: None },
    ]
}

fn fixtures() -> Vec<FixtureRecord> {
    vec![
        fixture("Senior Masculí", "Reus Deportiu", "CP Vic", "4-2"),
        fixture("Juvenil", "CP Vic", "CE Noia", ""),
        fixture("Senior Femení", "CE Noia", "CP Manlleu", ""),
    ]
}

fn step(session: Session, command: Command) -> Session {
    session.handle(command).0
}

fn choose(session: Session, index: usize) -> Session {
    let mut session = step(session, Command::OpenFilters);
    while session.picker_cursor() > 0 {
        session = step(session, Command::PickerUp);
    }
    for _ in 0..index {
        session = step(session, Command::PickerDown);
    }
    step(session, Command::ChooseFilter)
}

#[test]
fn catch_all_filter_is_listed_first() {
    let session = Session::new(fixtures(), filters());
    assert_eq!(session.filter_names(), vec!["Tots", "Seniors", "Vic"]);
    assert_eq!(session.visible(), fixtures().as_slice());
    assert_eq!(session.message(), "Carregats 3 partits");
}

#[test]
fn existing_catch_all_is_not_duplicated() {
    let mut with_all = filters();
    with_all.push(FilterDefinition::all());
    let session = Session::new(vec![], with_all);
    assert_eq!(session.filter_names(), vec!["Seniors", "Vic", "Tots"]);
    assert!(session.message().contains("Prem R"));
}

#[test]
fn leading_catch_all_under_another_name_is_kept_alone() {
    let mut with_todos = vec![FilterDefinition { name: "Todos".into(), search_text: Some(String::new()), category: None }];
    with_todos.extend(filters());
    let session = Session::new(fixtures(), with_todos);
    assert_eq!(session.filter_names(), vec!["Todos", "Seniors", "Vic"]);
    assert_eq!(session.visible().len(), 3);
}

#[test]
fn choosing_a_filter_narrows_the_list() {
    let session = choose(Session::new(fixtures(), filters()), 1);
    assert_eq!(session.view(), View::Fixtures);
    assert_eq!(session.active_filter().map(|f| f.name.as_str()), Some("Seniors"));
    assert_eq!(session.visible().len(), 2);
    assert!(session.summary().starts_with("Mostrant 2 partits | Filtre: Seniors"));

    let session = choose(session, 0);
    assert_eq!(session.visible().len(), 3);
}

#[test]
fn picker_cursor_is_clamped() {
    let mut session = step(Session::new(fixtures(), filters()), Command::OpenFilters);
    for _ in 0..10 {
        session = step(session, Command::PickerDown);
    }
    assert_eq!(session.picker_cursor(), 2);
    for _ in 0..10 {
        session = step(session, Command::PickerUp);
    }
    assert_eq!(session.picker_cursor(), 0);
    let session = step(session, Command::CloseOverlay);
    assert_eq!(session.view(), View::Fixtures);
}

#[test]
fn refresh_asks_for_a_fetch_once() {
    let (session, effect) = Session::new(fixtures(), filters()).handle(Command::Refresh);
    assert_eq!(effect, Some(Effect::Refresh));
    assert!(session.is_refreshing());

    let (session, effect) = session.handle(Command::Refresh);
    assert_eq!(effect, None, "second refresh while pending must be ignored");
    assert!(session.is_refreshing());
}

#[test]
fn completed_refresh_replaces_list_and_keeps_filter() {
    let session = choose(Session::new(fixtures(), filters()), 2);
    assert_eq!(session.visible().len(), 2);
    let session = step(session, Command::Refresh);

    let fresh = vec![fixture("Infantil", "CP Vic", "CH Lloret", ""), fixture("Aleví", "CE Noia", "CP Manlleu", "")];
    let at = Utc.with_ymd_and_hms(2025, 5, 12, 16, 30, 0).unwrap();
    let session = step(session, Command::RefreshDone { result: Ok(fresh.clone()), at });

    assert!(!session.is_refreshing());
    assert_eq!(session.fixtures(), fresh.as_slice());
    assert_eq!(session.visible(), &fresh[..1]);
    // 16:30 UTC is 18:30 in Barcelona during summer time.
    assert_eq!(session.message(), "2 partits desats (18:30)");
}

#[test]
fn failed_refresh_keeps_previous_list() {
    let session = step(Session::new(fixtures(), filters()), Command::Refresh);
    let at = Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).unwrap();
    let session = step(session, Command::RefreshDone { result: Err("timeout".into()), at });

    assert!(!session.is_refreshing());
    assert_eq!(session.fixtures(), fixtures().as_slice());
    assert_eq!(session.message(), "Error refrescant: timeout");

    let (_, effect) = session.handle(Command::Refresh);
    assert_eq!(effect, Some(Effect::Refresh), "user can retry");
}

#[test]
fn empty_refresh_clears_the_list() {
    let session = step(Session::new(fixtures(), filters()), Command::Refresh);
    let at = Utc.with_ymd_and_hms(2025, 1, 1, 12, 0, 0).unwrap();
    let session = step(session, Command::RefreshDone { result: Ok(Vec::new()), at });

    assert!(!session.is_refreshing());
    assert!(session.fixtures().is_empty());
    assert!(session.visible().is_empty());
    assert_eq!(session.message(), "0 partits desats (13:00)");
}

#[test]
fn detail_opens_on_the_topmost_row() {
    let session = Session::new(fixtures(), filters());
    assert_eq!(session.selected(), Some(&fixtures()[0]));
    assert_eq!(session.selected_line(), Some(2));

    let mut session = session;
    for _ in 0..3 {
        session = step(session, Command::ScrollDown);
    }
    assert_eq!(session.selected(), Some(&fixtures()[1]));
    assert_eq!(session.selected_line(), Some(3));

    let session = step(session, Command::OpenDetail);
    assert_eq!(session.view(), View::Detail);
    let session = step(session, Command::CloseOverlay);
    assert_eq!(session.view(), View::Fixtures);
}

#[test]
fn detail_needs_a_fixture() {
    let session = step(Session::new(vec![], filters()), Command::OpenDetail);
    assert_eq!(session.view(), View::Fixtures);
    assert_eq!(session.selected(), None);
    assert_eq!(session.message(), "Cap partit seleccionat");
}

#[test]
fn save_failure_is_reported_without_losing_data() {
    let session = step(Session::new(fixtures(), filters()), Command::SaveFailed("disk full".into()));
    assert!(session.message().contains("disk full"));
    assert_eq!(session.visible().len(), 3);
}

#[test]
fn search_filters_as_you_type_and_cancel_restores() {
    let mut session = step(Session::new(fixtures(), filters()), Command::OpenSearch);
    assert_eq!(session.view(), View::Search);
    for c in "noia".chars() {
        session = step(session, Command::SearchInput(c));
    }
    assert_eq!(session.visible().len(), 2);
    assert_eq!(session.message(), "Cercant: \"noia\" - 2 partits");

    session = step(session, Command::SearchInput('!'));
    assert!(session.visible().is_empty());
    session = step(session, Command::SearchBackspace);
    assert_eq!(session.visible().len(), 2);

    let accepted = step(session.clone(), Command::SearchAccept);
    assert_eq!(accepted.view(), View::Fixtures);
    assert_eq!(accepted.visible().len(), 2);
    assert!(accepted.summary().contains("Filtre: /noia"));

    let cancelled = step(session, Command::SearchCancel);
    assert_eq!(cancelled.query(), "");
    assert_eq!(cancelled.visible().len(), 3);
}

#[test]
fn scrolling_is_bounded_by_rendered_lines() {
    let many: Vec<_> = (0..30).map(|i| fixture(&format!("Lliga {}", i), "A", "B", "")).collect();
    let mut session = Session::new(many, vec![]);

    session = step(session, Command::ScrollUp);
    assert_eq!(session.scroll(), 0);

    session = step(session, Command::PageDown);
    assert_eq!(session.scroll(), PAGE_LINES);
    for _ in 0..10 {
        session = step(session, Command::PageDown);
    }
    // 30 rows plus header and rule
    assert_eq!(session.scroll(), 31);

    session = step(session, Command::PageUp);
    session = step(session, Command::ScrollDown);
    assert_eq!(session.scroll(), 22);
}

#[test]
fn help_and_quit() {
    let session = step(Session::new(vec![], vec![]), Command::ShowHelp);
    assert_eq!(session.view(), View::Help);
    let session = step(session, Command::CloseOverlay);
    assert_eq!(session.view(), View::Fixtures);
    let (_, effect) = session.handle(Command::Quit);
    assert_eq!(effect, Some(Effect::Quit));
}

#[test]
fn body_is_presenter_output() {
    let session = Session::new(fixtures(), vec![]);
    assert_eq!(session.body(), hoquei_fixtures::present::render(session.visible()));
}
