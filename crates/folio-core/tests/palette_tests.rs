// Command palette dispatch and error feedback.

use folio_core::palette::{parse, Command, CommandPalette, NoticeTimer, Outcome, Section};
use folio_core::Theme;

#[test]
fn every_command_resolves() {
    assert_eq!(parse("/about"), Some(Command::ScrollTo(Section::About)));
    assert_eq!(parse("/skills"), Some(Command::ScrollTo(Section::Skills)));
    assert_eq!(parse("/projects"), Some(Command::ScrollTo(Section::Projects)));
    assert_eq!(parse("/contact"), Some(Command::ScrollTo(Section::Contact)));
    assert_eq!(parse("/cyberpunk"), Some(Command::SetTheme(Theme::Cyberpunk)));
    assert_eq!(parse("/matrix"), Some(Command::SetTheme(Theme::Matrix)));
    assert_eq!(parse("/minimalist"), Some(Command::SetTheme(Theme::Minimalist)));
    assert_eq!(parse("/game"), Some(Command::StartGame));
}

#[test]
fn section_ids_match_page() {
    assert_eq!(Section::About.element_id(), "section-1");
    assert_eq!(Section::Skills.element_id(), "section-2");
    assert_eq!(Section::Projects.element_id(), "section-5");
    assert_eq!(Section::Contact.element_id(), "section-6");
}

#[test]
fn submit_dispatches_and_closes() {
    let mut p = CommandPalette::new();
    p.open();
    p.set_input("  /Matrix ");
    assert_eq!(p.submit(), Outcome::Dispatch(Command::SetTheme(Theme::Matrix)));
    assert!(!p.is_open());
    assert_eq!(p.input(), "");
}

#[test]
fn unknown_slash_command_keeps_palette_open() {
    let mut p = CommandPalette::new();
    p.open();
    p.set_input("/dance");
    assert_eq!(
        p.submit(),
        Outcome::Unknown("Unknown command: /dance".to_string())
    );
    assert!(p.is_open());
    assert_eq!(p.input(), "/dance");
}

#[test]
fn plain_text_is_ignored() {
    let mut p = CommandPalette::new();
    p.open();
    p.set_input("hello");
    assert_eq!(p.submit(), Outcome::Ignored);
    assert!(p.is_open());
}

#[test]
fn suggestion_chip_dispatches() {
    let mut p = CommandPalette::new();
    p.open();
    p.set_input("/mat");
    assert_eq!(
        p.choose("/minimalist"),
        Outcome::Dispatch(Command::SetTheme(Theme::Minimalist))
    );
    assert!(!p.is_open());
    assert_eq!(p.input(), "");
}

#[test]
fn reopened_palette_forgets_abandoned_input() {
    let mut p = CommandPalette::new();
    p.open();
    p.set_input("/matrix");
    p.close();
    assert_eq!(p.input(), "");
    p.open();
    assert_eq!(p.input(), "");
    assert_eq!(p.submit(), Outcome::Ignored);
    assert!(p.is_open());
}

#[test]
fn second_notice_outlives_first_timeout() {
    let mut timer = NoticeTimer::default();
    let (first, stale) = timer.show();
    assert_eq!(stale, None);
    timer.scheduled(11);

    let (second, stale) = timer.show();
    assert_eq!(stale, Some(11));
    timer.scheduled(12);

    // the first timeout still fires if it could not be cancelled
    assert!(!timer.expire(first));
    assert!(timer.expire(second));
    let (_, stale) = timer.show();
    assert_eq!(stale, None);
}
