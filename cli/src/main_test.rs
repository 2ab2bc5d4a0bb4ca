use super::*;

fn parse(args: &[&str]) -> Cli {
    Cli::try_parse_from(std::iter::once("notespace").chain(args.iter().copied())).unwrap()
}

#[test]
fn create_accepts_bare_public_flag() {
    let cli = parse(&["notes", "create", "--title", "Standup", "--content", "sync", "--public"]);
    let Command::Notes(NotesCommand { command: NotesSubcommand::Create(fields) }) = cli.command else {
        panic!("expected notes create");
    };
    assert_eq!(fields.public, Some(true));
    assert_eq!(fields.title.as_deref(), Some("Standup"));
}

#[test]
fn update_can_turn_public_off() {
    let cli = parse(&["notes", "update", "n1", "--public", "false"]);
    let Command::Notes(NotesCommand { command: NotesSubcommand::Update { id, fields } }) = cli.command else {
        panic!("expected notes update");
    };
    assert_eq!(id, "n1");
    assert_eq!(fields.public, Some(false));
    assert_eq!(fields.title, None);
}

#[test]
fn json_flag_is_global() {
    let cli = parse(&["public", "--search", "trip", "--json"]);
    assert!(cli.json);
    assert!(matches!(cli.command, Command::Public { search: Some(ref s) } if s == "trip"));
}

#[test]
fn apply_keeps_fields_that_were_not_given() {
    let mut form = NoteForm {
        title: "Grocery".to_owned(),
        content: "milk".to_owned(),
        is_public: true,
        start_time: "2024-05-01T09:00".to_owned(),
        end_time: "2024-05-01T10:00".to_owned(),
    };
    NoteFields { content: Some("milk eggs".to_owned()), end: Some(String::new()), ..NoteFields::default() }.apply(&mut form);

    assert_eq!(form.title, "Grocery");
    assert_eq!(form.content, "milk eggs");
    assert!(form.is_public);
    assert_eq!(form.start_time, "2024-05-01T09:00");
    assert_eq!(form.end_time, "");
}

#[test]
fn missing_subcommand_is_an_error() {
    assert!(Cli::try_parse_from(["notespace"]).is_err());
}
