//! Prompt-driven session: query form, results panel and history/stats panel.

use anyhow::Context;
use inquire::{InquireError, Select, Text};
use tourism_core::{
    HistoryPanel, QuerySession, ResultsView, TourismApi, client::DEFAULT_PLACE_HISTORY_LIMIT,
    render,
};

const EXAMPLE_QUERIES: [&str; 3] = [
    "I'm going to go to Bangalore, let's plan my trip.",
    "I'm going to go to Bangalore, what is the temperature there?",
    "I'm going to go to Bangalore, what is the temperature there? And what are the places I can visit?",
];

const HELP: &str = ":examples pick an example, :history refresh, :place <name> filter, :quit exit";

#[derive(Debug, PartialEq, Eq)]
enum Input<'a> {
    Blank,
    Quit,
    Examples,
    History,
    Place(&'a str),
    Query(&'a str),
}

impl<'a> Input<'a> {
    fn parse(line: &'a str) -> Self {
        let line = line.trim();
        let Some(command) = line.strip_prefix(':') else {
            return if line.is_empty() { Input::Blank } else { Input::Query(line) };
        };

        let (name, arg) = command.split_once(char::is_whitespace).unwrap_or((command, ""));
        match (name, arg.trim()) {
            ("q" | "quit" | "exit", _) => Input::Quit,
            ("examples" | "e", _) => Input::Examples,
            ("history" | "h", _) => Input::History,
            ("place" | "p", place) if !place.is_empty() => Input::Place(place),
            _ => Input::Query(line),
        }
    }
}

pub async fn run(api: &dyn TourismApi, history_limit: u32) -> anyhow::Result<()> {
    println!("Tourism AI - weather and tourist attractions for any place");
    println!("Backend: {}\n", api.base_url());

    let mut panel = HistoryPanel::new();
    panel.refresh(api, history_limit).await;
    print!("{}", render::panel(&panel));

    let mut session = QuerySession::new();
    println!();
    print!("{}", render::results(&ResultsView::from_session(&session)));

    loop {
        let prompt = Text::new("Ask about any place:")
            .with_placeholder(EXAMPLE_QUERIES[0])
            .with_help_message(HELP)
            .prompt();
        let Some(line) = answered(prompt).context("Failed to read query")? else {
            break;
        };

        let query = match Input::parse(&line) {
            Input::Blank => continue,
            Input::Quit => break,
            Input::History => {
                panel.refresh(api, history_limit).await;
                print!("{}", render::panel(&panel));
                continue;
            }
            Input::Place(place) => {
                panel.refresh_place(api, place, DEFAULT_PLACE_HISTORY_LIMIT).await;
                print!("{}", render::panel(&panel));
                continue;
            }
            Input::Examples => match pick_example()? {
                Some(example) => example.to_owned(),
                None => continue,
            },
            Input::Query(text) => text.to_owned(),
        };

        submit(api, &mut session, &query).await;

        panel.refresh(api, history_limit).await;
        println!();
        print!("{}", render::panel(&panel));
    }

    Ok(())
}

async fn submit(api: &dyn TourismApi, session: &mut QuerySession, query: &str) {
    let sent = session
        .submit_with(api, query, None, |s| {
            print!("{}", render::results(&ResultsView::from_session(s)));
        })
        .await;

    if sent {
        println!();
        print!("{}", render::results(&ResultsView::from_session(session)));
    }
}

fn pick_example() -> anyhow::Result<Option<&'static str>> {
    answered(Select::new("Example queries:", EXAMPLE_QUERIES.to_vec()).prompt())
        .context("Failed to pick an example")
}

/// `None` when the user backed out or there is no terminal to prompt on.
fn answered<T>(result: Result<T, InquireError>) -> Result<Option<T>, InquireError> {
    match result {
        Ok(value) => Ok(Some(value)),
        Err(
            InquireError::OperationCanceled
            | InquireError::OperationInterrupted
            | InquireError::NotTTY,
        ) => Ok(None),
        Err(err) => Err(err),
    }
}
