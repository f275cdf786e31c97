//! Integration tests driving complete conversations with the built-in corpora.

use maila::config::ChatConfig;
use maila::dialogue::{DialogueManager, DialogueState};

fn manager() -> DialogueManager {
    DialogueManager::from_config(&ChatConfig::default())
}

#[test]
fn test_naming_round_trip() {
    let mut manager = manager();

    let reply = manager.respond("what is my name");
    assert_eq!(
        reply.text,
        "I don't think you've told me your name yet, would you like to set it?"
    );
    assert_eq!(reply.session.state(), DialogueState::AwaitingNameConfirm);

    let reply = manager.respond("yes");
    assert_eq!(reply.text, "Very well! Simply tell me your name please!");
    assert_eq!(reply.session.state(), DialogueState::AwaitingName);

    let reply = manager.respond("Alex");
    assert_eq!(reply.text, "Got it, you are Alex!");
    assert_eq!(reply.session.username(), Some("Alex"));
    assert_eq!(reply.session.state(), DialogueState::Normal);

    let reply = manager.respond("what is my name");
    assert_eq!(reply.text, "You are Alex.");
    assert_eq!(reply.session.state(), DialogueState::Normal);
}

#[test]
fn test_declining_to_give_a_name() {
    let mut manager = manager();

    manager.respond("who am i");
    let reply = manager.respond("maybe");
    assert_eq!(
        reply.text,
        "I couldn't understand your reply, can you try again? (Yes/No/Cancel)"
    );
    assert_eq!(reply.session.state(), DialogueState::AwaitingNameConfirm);

    let reply = manager.respond("no");
    assert_eq!(reply.text, "Alright then!");
    assert_eq!(reply.session.state(), DialogueState::Normal);
    assert_eq!(reply.session.username(), None);
}

#[test]
fn test_name_change_and_direct_naming() {
    let mut manager = manager();

    let reply = manager.respond("my name is alex");
    assert_eq!(reply.text, "Nice to meet you, Alex. I'll remember you.");

    let reply = manager.respond("call me sam");
    assert_eq!(reply.text, "Alex, you want to be called Sam now? Very well!");
    assert_eq!(reply.session.username(), Some("Sam"));

    let reply = manager.respond("change my name");
    assert_eq!(reply.session.state(), DialogueState::AwaitingName);

    let reply = manager.respond("   ");
    assert_eq!(reply.session.state(), DialogueState::AwaitingName);

    let reply = manager.respond("robin");
    assert_eq!(reply.session.username(), Some("Robin"));
    assert_eq!(reply.session.state(), DialogueState::Normal);
}

#[test]
fn test_help_menu_scenario() {
    let mut manager = manager();

    let reply = manager.respond("help");
    assert!(reply.text.starts_with("What do you need help with?"));
    assert_eq!(reply.session.state(), DialogueState::GeneralHelpLoop);

    let reply = manager.respond("capabilities");
    assert!(reply.text.starts_with("I am capable of basic small talk"));
    assert_eq!(reply.session.state(), DialogueState::CapabilitiesHelp);

    let reply = manager.respond("no");
    assert_eq!(reply.text, "Very well.");
    assert_eq!(reply.session.state(), DialogueState::Normal);
}

#[test]
fn test_help_menu_topics() {
    let mut manager = manager();

    manager.respond("help");
    let reply = manager.respond("yes");
    assert_eq!(reply.session.state(), DialogueState::GeneralHelpLoop);

    let reply = manager.respond("commands");
    assert!(reply.text.contains("WHERE AM I"));
    assert_eq!(reply.session.state(), DialogueState::Normal);

    manager.respond("what can you do");
    let reply = manager.respond("tell me about email");
    assert!(reply.text.contains("temporary email"));
    assert_eq!(reply.session.state(), DialogueState::Normal);
}

#[test]
fn test_name_deletion() {
    let mut manager = manager();
    manager.respond("my name is Alex");
    assert_eq!(manager.session().username(), Some("Alex"));

    let reply = manager.respond("forget my name");
    assert_eq!(reply.text, "I've forgotten your name, Alex.");
    assert_eq!(reply.session.username(), None);
    assert_eq!(reply.session.state(), DialogueState::Normal);

    let reply = manager.respond("forget my name");
    assert_eq!(reply.text, "I don't think I know your name yet.");
    assert_eq!(reply.session.username(), None);
    assert_eq!(reply.session.state(), DialogueState::Normal);
}

#[test]
fn test_polite_name_deletion_keeps_normal_state() {
    let mut manager = manager();
    manager.respond("my name is Alex");

    let reply = manager.respond("can you forget my name");
    assert_eq!(reply.text, "I've forgotten your name, Alex.");
    assert_eq!(reply.session.username(), None);
    assert_eq!(reply.session.state(), DialogueState::Normal);

    manager.respond("call me sam");
    let reply = manager.respond("please remove my name");
    assert_eq!(reply.text, "I've forgotten your name, Sam.");
    assert_eq!(reply.session.state(), DialogueState::Normal);

    let reply = manager.respond("could you delete my name");
    assert_eq!(reply.text, "I don't think I know your name yet.");
    assert_eq!(reply.session.state(), DialogueState::Normal);

    // the next message is not captured as a name
    manager.respond("hello");
    assert_eq!(manager.session().username(), None);
}

#[test]
fn test_factual_questions() {
    let mut manager = manager();

    let reply = manager.respond("what is the capital of France");
    assert_eq!(reply.text, "The capital of France is Paris.");
    assert_eq!(reply.session.state(), DialogueState::Normal);

    let reply = manager.respond("Who painted the Mona Lisa?");
    assert_eq!(reply.text, "The Mona Lisa was painted by Leonardo da Vinci.");

    manager.respond("what can you do");
    let reply = manager.respond("questions");
    assert!(reply.text.starts_with("I have a wide variety of knowledge!"));
    assert_eq!(reply.session.state(), DialogueState::Normal);

    let reply = manager.respond("how many continents are there");
    assert_eq!(reply.text, "There are seven continents.");
}

#[test]
fn test_cancel_from_every_state() {
    let entries = [
        ("what is my name", DialogueState::AwaitingNameConfirm),
        ("change my name", DialogueState::AwaitingName),
        ("help", DialogueState::GeneralHelpLoop),
        ("what can you do", DialogueState::CapabilitiesHelp),
    ];

    for (utterance, state) in entries {
        let mut manager = manager();
        manager.respond("my name is Alex");

        let reply = manager.respond(utterance);
        assert_eq!(reply.session.state(), state, "entering via {utterance:?}");

        let reply = manager.respond("Cancel");
        assert_eq!(reply.text, "I've cancelled the current action, what now?");
        assert_eq!(reply.session.state(), DialogueState::Normal);
        assert_eq!(reply.session.username(), Some("Alex"));
    }
}

#[test]
fn test_cancel_from_normal() {
    let mut manager = manager();
    let reply = manager.respond("cancel");
    assert_eq!(reply.text, "There's nothing to cancel right now.");
    assert_eq!(reply.session.state(), DialogueState::Normal);
}

#[test]
fn test_cancel_is_never_taken_as_a_name() {
    let mut manager = manager();
    manager.respond("change my name");

    let reply = manager.respond("cancel");
    assert_eq!(reply.session.state(), DialogueState::Normal);
    assert_eq!(reply.session.username(), None);
}

#[test]
fn test_where_am_i() {
    let mut manager = manager();

    let reply = manager.respond("where am i");
    assert_eq!(reply.text, DialogueState::Normal.describe());

    manager.respond("who am i");
    let reply = manager.respond("Where am I?");
    assert_eq!(reply.text, DialogueState::AwaitingNameConfirm.describe());
    assert_eq!(reply.session.state(), DialogueState::AwaitingNameConfirm);

    // still waiting for the answer
    let reply = manager.respond("yes");
    assert_eq!(reply.session.state(), DialogueState::AwaitingName);
}

#[test]
fn test_empty_and_unrecognized_input() {
    let mut manager = manager();

    assert_eq!(manager.respond("").text, "Please say something!");
    assert_eq!(manager.respond("...").text, "Please say something!");
    assert_eq!(
        manager.respond("purple elephants").text,
        "Forgive me, but I'm unable to recognize what you are saying."
    );
    assert_eq!(manager.session().state(), DialogueState::Normal);
}

#[test]
fn test_small_talk_and_purpose() {
    let mut manager = manager();

    assert_eq!(
        manager.respond("Hello").text,
        "Hello there! How can I help you today?"
    );

    let reply = manager.respond("what is your purpose");
    assert!(reply.text.starts_with("I am Maila, an AI-powered Chatbot."));
    assert_eq!(reply.session.state(), DialogueState::Normal);
}
