mod common;

use common::{markers, run_on};
use highway_lib::{Command, CommandReader, Error, Highway, HighwayConfig};

#[test]
fn italian_and_english_scripts_agree() {
    let english = "add-station 0 1 5\nadd-station 5 1 5\nadd-station 10 0\n\
                   add-vehicle 10 3\nscrap-vehicle 10 3\nplan-route 0 10\nremove-station 5\n";
    let italian = "aggiungi-stazione 0 1 5\naggiungi-stazione 5 1 5\naggiungi-stazione 10 0\n\
                   aggiungi-auto 10 3\nrottama-auto 10 3\npianifica-percorso 0 10\n\
                   demolisci-stazione 5\n";

    let mut first = Highway::default();
    let mut second = Highway::default();
    let english_lines = run_on(&mut first, english);
    let italian_lines = run_on(&mut second, italian);

    assert_eq!(english_lines, italian_lines);
    assert_eq!(markers(&first), vec![0, 10]);
    assert_eq!(markers(&first), markers(&second));
}

#[test]
fn oversized_station_consumes_its_arguments() {
    let mut highway = Highway::new(HighwayConfig { pool_capacity: 2 });
    let lines = run_on(
        &mut highway,
        "add-station 0 4 1 2 3 4\nadd-station 9 2 10 20\nplan-route 9 9\n",
    );
    assert_eq!(lines, vec!["not added", "added", "9"]);
    assert_eq!(markers(&highway), vec![9]);
}

#[test]
fn arguments_may_span_lines() {
    let script = "plan-route\n  -4\n\n 12 remove-station\n3";
    let commands: Vec<Command> = CommandReader::new(script.as_bytes())
        .collect::<Result<_, _>>()
        .expect("valid stream");
    assert_eq!(
        commands,
        vec![
            Command::PlanRoute { start: -4, goal: 12 },
            Command::RemoveStation { marker: 3 },
        ]
    );
}

#[test]
fn parse_errors_name_the_problem() {
    let mut reader = CommandReader::new("add-vehicle 4".as_bytes());
    let error = reader.next_command().expect_err("truncated");
    assert!(matches!(
        error,
        Error::MissingArgument {
            command: "add-vehicle",
            argument: "autonomy"
        }
    ));

    let mut reader = CommandReader::new("scrap-vehicle 4 1.5".as_bytes());
    let error = reader.next_command().expect_err("autonomy is an integer");
    assert!(matches!(error, Error::InvalidNumber { ref value, .. } if value == "1.5"));

    let mut reader = CommandReader::new("pianifica-percorsi 1 2".as_bytes());
    let error = reader.next_command().expect_err("unknown keyword");
    assert!(error.to_string().contains("pianifica-percorso"), "{error}");
}

#[test]
fn negative_autonomy_does_not_stop_the_stream() {
    let lines = run_on(
        &mut Highway::default(),
        "add-station 5 0\naggiungi-auto 5 -3\nadd-station 9 -1\nplan-route 5 9\n",
    );
    assert_eq!(lines, vec!["added", "not added", "added", "no route"]);
}
