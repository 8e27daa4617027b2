use crate::card::{conversation_turns, Side};
use crate::{organize, EmojiMap, PortraitBook, Renderer};
use chronicle_parser::parse;
use std::collections::BTreeMap;

fn renderer() -> Renderer {
    let mut portraits = BTreeMap::new();
    portraits.insert("Elora".to_string(), "img/elora.png".to_string());
    Renderer::new(
        PortraitBook::new(&portraits, "img/default.png"),
        EmojiMap::with_overrides(&BTreeMap::new()),
    )
}

#[test]
fn test_text_card() {
    let records = parse("Type: text\nTitle: First Night\nDate: Jan 1, 2024\n\nWe met at the **tavern**.");
    let html = renderer().render_post(&records[0]);

    assert!(html.contains("class=\"card\""));
    assert!(html.contains("Jan 1, 2024"));
    assert!(html.contains("First Night"));
    assert!(html.contains("<strong>tavern</strong>"));
}

#[test]
fn test_recap_card_is_tagged() {
    let records = parse("Type: recap\nTitle: Previously\n\nA short summary.");
    let html = renderer().render_post(&records[0]);
    assert!(html.contains("recap-card"));
}

#[test]
fn test_image_card_escapes_url() {
    let records = parse("Type: image\nCaption: The keep\nDate: Jan 1, 2024\n\nhttp://x/y.png?a=1&b=2");
    let html = renderer().render_post(&records[0]);
    assert!(html.contains("src=\"http://x/y.png?a=1&amp;b=2\""));
    assert!(html.contains("The keep"));
}

#[test]
fn test_quote_card_default_author() {
    let records = parse("Type: quote\nDate: Jan 1, 2024\n\nFortune favors the bold.");
    let html = renderer().render_post(&records[0]);
    assert!(html.contains("Fortune favors the bold."));
    assert!(html.contains("\u{2014} Unknown"));
    assert!(html.contains("quote-container"));
}

#[test]
fn test_conversation_sides_alternate() {
    let turns = conversation_turns("A: one\nB: two\nA: three\nB: four");
    let sides: Vec<Side> = turns.iter().map(|t| t.side).collect();
    assert_eq!(sides, vec![Side::Left, Side::Right, Side::Left, Side::Right]);
}

#[test]
fn test_conversation_dropped_line_keeps_no_parity_slot() {
    // Line 2 has no colon: the three survivors alternate left, right, left.
    let turns = conversation_turns("A: one\nno colon here\nB: two\nA: three");
    assert_eq!(turns.len(), 3);
    let sides: Vec<Side> = turns.iter().map(|t| t.side).collect();
    assert_eq!(sides, vec![Side::Left, Side::Right, Side::Left]);
}

#[test]
fn test_conversation_empty_speaker_or_text_dropped() {
    let turns = conversation_turns(": no speaker\nA:   \nB: kept");
    assert_eq!(turns.len(), 1);
    assert_eq!(turns[0].speaker, "B");
    assert_eq!(turns[0].side, Side::Left);
}

#[test]
fn test_conversation_portraits_resolved() {
    let records = parse("Type: conversation\n\nElora: Hello\nStranger: Who goes there?");
    let html = renderer().render_post(&records[0]);
    assert!(html.contains("img/elora.png"));
    assert!(html.contains("img/default.png"));
    assert!(html.contains("chat-bubble left"));
    assert!(html.contains("chat-bubble right"));
}

#[test]
fn test_character_card_default_name() {
    let records = parse("Type: character\n\nA mysterious figure.");
    let html = renderer().render_post(&records[0]);
    assert!(html.contains("Unknown Character"));
    assert!(html.contains("img/default.png"));
}

#[test]
fn test_location_card_roster() {
    let records =
        parse("Type: location\nName: The Gilded Flagon\nCharacters: Elora , Stranger\n\nA tavern.");
    let html = renderer().render_post(&records[0]);
    assert!(html.contains("The Gilded Flagon"));
    assert!(html.contains("mini-card"));
    assert!(html.contains("img/elora.png"));
    assert!(html.contains(">Elora</span>"));
    assert!(html.contains("img/default.png"));
}

#[test]
fn test_travel_card_defaults() {
    let records = parse("Type: travel\n\nWe walked.");
    let html = renderer().render_post(&records[0]);
    assert!(html.contains("Origin"));
    assert!(html.contains("Destination"));
    assert!(html.contains("travel-arrow"));
}

#[test]
fn test_unknown_type_fallback_card() {
    let records = parse("Type: Ballad<script>\nDate: Jan 1, 2024\n\nla la la");
    let html = renderer().render_post(&records[0]);
    assert!(html.contains("unknown-card"));
    assert!(html.contains("Ballad&lt;script&gt;"));
    assert!(html.contains("Jan 1, 2024"));
}

#[test]
fn test_emoji_in_plain_fields_and_body() {
    let records = parse("Type: quote\nAuthor: Brum\n\nTo battle! :crossed_swords:");
    let html = renderer().render_post(&records[0]);
    assert!(html.contains("\u{2694}\u{FE0F}"));
}

#[test]
fn test_render_page_for_session() {
    let source = "Type: recap\nTitle: The Siege\nDate: Jan 5, 2024\n\nsummary\n---\nType: text\nTitle: Later\n\nmore";
    let session = organize(2, parse(source));
    let html = renderer()
        .render_page(&session, "Campaign Diary", "#3366ff")
        .expect("render_page");

    assert!(html.contains("<!DOCTYPE html>"));
    assert!(html.contains("Campaign Diary"));
    assert!(html.contains("Session 2 \u{2014} The Siege"));
    assert!(html.contains("--theme-color: #3366ff"));
    // Recap card comes before the text card.
    let recap_at = html.find("recap-card").unwrap();
    let later_at = html.find("Later").unwrap();
    assert!(recap_at < later_at);
}

#[test]
fn test_render_page_rejects_bad_theme_color() {
    let session = organize(1, Vec::new());
    let err = renderer()
        .render_page(&session, "Diary", "red; } body { display: none")
        .unwrap_err();
    assert!(err.to_string().contains("Invalid theme color"));
}

#[test]
fn test_render_index_empty_state() {
    let html = renderer()
        .render_index(&[], "Campaign Diary", "#abc")
        .expect("render_index");
    assert!(html.contains("No sessions yet"));
}

#[test]
fn test_render_index_lists_sessions() {
    let one = organize(1, parse("Type: recap\nTitle: Opening\nDate: Jan 1, 2024\n\nx"));
    let two = organize(2, parse("Type: text\n\ny"));
    let html = renderer()
        .render_index(&[two, one], "Campaign Diary", "#3366ff")
        .expect("render_index");

    assert!(html.contains("href=\"session-1.html\""));
    assert!(html.contains("href=\"session-2.html\""));
    assert!(html.contains("Session 1 \u{2014} Opening"));
}
