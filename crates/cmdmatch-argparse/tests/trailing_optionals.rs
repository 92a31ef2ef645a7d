use cmdmatch_argparse::{
    ArgumentDef, Command, CommandBuilder, ConfigError, OptionDef, Value, ValueSpec, ValueType,
};
use test_case::test_case;

const ARGUMENTS: [&str; 4] = ["PID", "TYPE", "ACTION", "LEVEL"];

fn int_argument(name: &str) -> ArgumentDef {
    ArgumentDef::new(name, ValueType::Integer).help(format!("Description for {name}."))
}

fn command() -> Command {
    Command::builder("cmd")
        .description("Main description.")
        .argument(int_argument("PID"))
        .argument(int_argument("TYPE"))
        .argument(int_argument("ACTION").default_value(-300))
        .argument(int_argument("LEVEL").default_value(-400))
        .option(
            OptionDef::new("a")
                .help("Description for -a.")
                .value(ValueSpec::new(ValueType::Integer).default_value(-11)),
        )
        .option(
            OptionDef::new("b")
                .help("Description for -b.")
                .value(ValueSpec::new(ValueType::Integer)),
        )
        .option(OptionDef::new("c").help("Description for -c."))
        .build()
        .unwrap()
}

#[derive(Debug, PartialEq)]
struct Outcome {
    a: Option<i32>,
    b: Option<i32>,
    c: bool,
    arguments: Vec<i32>,
}

fn ok(a: Option<i32>, b: Option<i32>, c: bool, arguments: [i32; 4]) -> Result<Outcome, String> {
    Ok(Outcome {
        a,
        b,
        c,
        arguments: arguments.to_vec(),
    })
}

fn int(value: Option<&Value>) -> Option<i32> {
    match value {
        Some(Value::Integer(v)) => Some(*v),
        None => None,
        Some(other) => panic!("expected an i32 value, got: {other:?}"),
    }
}

fn parse(tokens: &[&str]) -> Result<Outcome, String> {
    let command = command();
    let m = command.parse(tokens).map_err(|e| e.to_string())?;
    assert_eq!(m.option_exists("-a"), m.option_value("-a").is_some());
    assert_eq!(m.option_exists("-b"), m.option_value("-b").is_some());
    Ok(Outcome {
        a: int(m.option_value("-a")),
        b: int(m.option_value("-b")),
        c: m.option_exists("-c"),
        arguments: ARGUMENTS
            .iter()
            .map(|name| int(m.argument_value(name)).unwrap())
            .collect(),
    })
}

#[test_case(&["-a11", "-b22", "-c", "100", "200", "300", "400"]
    => ok(Some(11), Some(22), true, [100, 200, 300, 400]); "combined option values")]
#[test_case(&["-a", "11", "-b", "22", "-c", "100", "200", "300", "400"]
    => ok(Some(11), Some(22), true, [100, 200, 300, 400]); "separate option values")]
#[test_case(&["100", "200", "300", "400"]
    => ok(None, None, false, [100, 200, 300, 400]); "arguments only")]
#[test_case(&["100", "200"]
    => ok(None, None, false, [100, 200, -300, -400]); "mandatory arguments only")]
#[test_case(&["100", "200", "300"]
    => ok(None, None, false, [100, 200, 300, -400]); "first optional supplied")]
#[test_case(&["-a", "-b22", "-c", "100", "200", "300", "400"]
    => ok(Some(-11), Some(22), true, [100, 200, 300, 400]); "option default before option")]
#[test_case(&["-a", "-b22", "-c", "100", "200"]
    => ok(Some(-11), Some(22), true, [100, 200, -300, -400]); "option default with mandatory arguments")]
#[test_case(&["-a11", "100", "200", "300", "400"]
    => ok(Some(11), None, false, [100, 200, 300, 400]); "one option and all arguments")]
#[test_case(&["-a11", "100", "200"]
    => ok(Some(11), None, false, [100, 200, -300, -400]); "one option and mandatory arguments")]
#[test_case(&["-a", "100", "200", "300", "400"]
    => ok(Some(100), None, false, [200, 300, 400, -400]); "next value token wins over option default")]
#[test_case(&["-b", "22", "-c", "100", "200", "300", "400", "-a", "11"]
    => ok(Some(11), Some(22), true, [100, 200, 300, 400]); "option with value after arguments")]
#[test_case(&["-b", "22", "100", "200", "300", "400", "-a", "11", "-c"]
    => ok(Some(11), Some(22), true, [100, 200, 300, 400]); "options on both sides")]
#[test_case(&["-b", "22", "100", "200", "300", "400", "-a", "-c"]
    => ok(Some(-11), Some(22), true, [100, 200, 300, 400]); "trailing option default")]
#[test_case(&["-c", "100", "200", "300", "400", "-a", "11", "-b", "22"]
    => ok(Some(11), Some(22), true, [100, 200, 300, 400]); "flag first values last")]
#[test_case(&["-b", "22", "100", "200", "-a", "-c"]
    => ok(Some(-11), Some(22), true, [100, 200, -300, -400]); "trailing options with mandatory arguments")]
#[test_case(&["-b", "22", "100", "200", "300", "-a", "-c"]
    => ok(Some(-11), Some(22), true, [100, 200, 300, -400]); "trailing options with one optional argument")]
fn two_trailing_optionals(tokens: &[&str]) -> Result<Outcome, String> {
    parse(tokens)
}

#[test_case(&["100"]
    => Err("Too few command line arguments. Expected min: 2 but was: 1.".to_string()); "too few")]
#[test_case(&["100", "200", "300", "400", "500"]
    => Err("Too many command line arguments. Expected max: 4 but was: 5.".to_string()); "too many")]
#[test_case(&["-a", "100", "200"]
    => Err("Too few command line arguments. Expected min: 2 but was: 1.".to_string());
    "option takes the first argument")]
#[test_case(&["100", "200", "300", "-b22", "400"]
    => Err("Command line argument '400' is at the wrong position. All the arguments must be \
            sequentially positioned (i.e. options cannot be between arguments).".to_string());
    "option after third argument")]
#[test_case(&["100", "200", "-b22", "300", "400"]
    => Err("Command line argument '300' is at the wrong position. All the arguments must be \
            sequentially positioned (i.e. options cannot be between arguments).".to_string());
    "option after second argument")]
#[test_case(&["100", "-b22", "200", "300", "400"]
    => Err("Too few command line arguments. Expected min: 2 but was: 1. \
            Check that there are no options between arguments.".to_string());
    "option with value after first argument")]
#[test_case(&["100", "-c", "200", "300", "400"]
    => Err("Too few command line arguments. Expected min: 2 but was: 1. \
            Check that there are no options between arguments.".to_string());
    "flag after first argument")]
#[test_case(&["-a1", "-a2", "100", "200"]
    => Err("Option '-a' can occur only once.".to_string()); "repeated option")]
fn two_trailing_optionals_rejected(tokens: &[&str]) -> Result<Outcome, String> {
    parse(tokens)
}

fn misplaced_message(builder: CommandBuilder) -> String {
    match builder.build() {
        Err(err @ ConfigError::MisplacedOptionalArgument(_)) => err.to_string(),
        other => panic!("expected MisplacedOptionalArgument, got: {other:?}"),
    }
}

fn expected_misplaced(name: &str) -> String {
    format!(
        "If there is more than one optional argument they must be the last arguments. \
         The first conflicting argument is '{name}'. A single optional argument can have any position."
    )
}

#[test]
fn mandatory_after_two_optionals() {
    let builder = Command::builder("cmd")
        .argument(int_argument("PID"))
        .argument(int_argument("TYPE").default_value(-200))
        .argument(int_argument("ACTION").default_value(-300))
        .argument(int_argument("LEVEL"));
    assert_eq!(misplaced_message(builder), expected_misplaced("LEVEL"));
}

#[test]
fn optional_after_mandatory_that_follows_an_optional() {
    let builder = Command::builder("cmd")
        .argument(int_argument("PID"))
        .argument(int_argument("TYPE").default_value(-200))
        .argument(int_argument("ACTION"))
        .argument(int_argument("LEVEL").default_value(-400));
    assert_eq!(misplaced_message(builder.clone()), expected_misplaced("LEVEL"));

    let builder = builder.argument(int_argument("INFO").default_value(-500));
    assert_eq!(misplaced_message(builder), expected_misplaced("LEVEL"));
}

#[test]
fn mandatory_after_three_optionals() {
    let builder = Command::builder("cmd")
        .argument(int_argument("PID"))
        .argument(int_argument("TYPE").default_value(-200))
        .argument(int_argument("ACTION").default_value(-300))
        .argument(int_argument("LEVEL").default_value(-400))
        .argument(int_argument("INFO"));
    assert_eq!(misplaced_message(builder), expected_misplaced("INFO"));
}
