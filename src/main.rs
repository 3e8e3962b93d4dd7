use std::{fs, path::PathBuf, process, rc::Rc, time::Instant};

use clap::Parser;
use log::{error, info, LevelFilter};
use transpiler::{
    compiler::compiler::{transpile, IndentStyle, TranspileOptions},
    display_error,
    errors::errors::Error,
    lexer::lexer::tokenize,
    parser::parser::{parse, parse_type_list},
    select_function,
    type_checker::types::{to_semantic, ReturnType, SemanticType},
};

#[derive(Parser)]
#[command(name = "transpiler")]
#[command(about = "Transpile a typed Python function into C-like source")]
struct Cli {
    /// Python source file containing the function
    input: PathBuf,

    /// Function to transpile (defaults to the first one in the file)
    #[arg(short, long)]
    function: Option<String>,

    /// Parameter types, overriding annotations, e.g. "list[float], int"
    #[arg(long)]
    arg_types: Option<String>,

    /// Known callee and its return type, e.g. "norm:float" (repeatable)
    #[arg(long = "extern", value_name = "NAME:TYPE")]
    externs: Vec<String>,

    /// Indent with this many spaces instead of tabs
    #[arg(long)]
    indent_spaces: Option<usize>,

    /// Output file (stdout when omitted)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Raise the log level (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn parse_semantic_types(source: &str) -> Result<Vec<SemanticType>, Error> {
    parse_type_list(source)?.iter().map(to_semantic).collect()
}

fn parse_extern(entry: &str) -> Result<(String, ReturnType), String> {
    let (name, ty) = entry
        .split_once(':')
        .ok_or_else(|| format!("expected NAME:TYPE, received {:?}", entry))?;

    let return_type = match ty.trim() {
        "void" | "None" => ReturnType::Void,
        ty => match parse_semantic_types(ty) {
            Ok(types) if types.len() == 1 => ReturnType::Value(types[0]),
            Ok(_) => return Err(format!("expected a single type for {:?}", name)),
            Err(error) => return Err(format!("invalid type for {:?}: {}", name, error)),
        },
    };

    Ok((name.trim().to_string(), return_type))
}

fn build_options(cli: &Cli) -> Result<TranspileOptions, String> {
    let param_types = match &cli.arg_types {
        Some(source) => Some(
            parse_semantic_types(source)
                .map_err(|error| format!("invalid --arg-types: {}", error))?,
        ),
        None => None,
    };

    let externs = cli
        .externs
        .iter()
        .map(String::as_str)
        .map(parse_extern)
        .collect::<Result<Vec<(String, ReturnType)>, String>>()?;

    let indent = match cli.indent_spaces {
        Some(count) => IndentStyle::Spaces(count),
        None => IndentStyle::Tab,
    };

    Ok(TranspileOptions {
        param_types,
        externs,
        indent,
    })
}

/// Same phases as `transpile_source`, timed one by one.
fn run_pipeline(
    source: &str,
    file_name: &str,
    function: Option<&str>,
    options: &TranspileOptions,
) -> Result<String, Error> {
    let start = Instant::now();
    let tokens = tokenize(source.to_string(), Some(file_name.to_string()))?;
    info!("Tokenized in {:?}", start.elapsed());

    let parse_start = Instant::now();
    let module = parse(tokens, Rc::new(file_name.to_string())).1?;
    info!("Parsed in {:?}", parse_start.elapsed());

    let transpile_start = Instant::now();
    let output = transpile(select_function(&module, function, file_name)?, options)?;
    info!("Transpiled in {:?}", transpile_start.elapsed());

    Ok(output)
}

fn main() {
    let cli = Cli::parse();

    let level = match cli.verbose {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        2 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    };
    env_logger::Builder::from_default_env().filter_level(level).init();

    let options = match build_options(&cli) {
        Ok(options) => options,
        Err(message) => {
            error!("{}", message);
            process::exit(2);
        }
    };

    let source = match fs::read_to_string(&cli.input) {
        Ok(source) => source,
        Err(err) => {
            error!("failed to read {}: {}", cli.input.display(), err);
            process::exit(1);
        }
    };

    let file_name = cli
        .input
        .file_name()
        .map(|name| name.to_string_lossy().to_string())
        .unwrap_or_else(|| cli.input.to_string_lossy().to_string());

    let start = Instant::now();
    let output = match run_pipeline(&source, &file_name, cli.function.as_deref(), &options) {
        Ok(output) => output,
        Err(err) => {
            display_error(&err, &source);
            process::exit(1);
        }
    };
    info!("Total time: {:?}", start.elapsed());

    match &cli.output {
        Some(path) => {
            if let Err(err) = fs::write(path, &output) {
                error!("failed to write {}: {}", path.display(), err);
                process::exit(1);
            }
            info!("Wrote {}", path.display());
        }
        None => print!("{}", output),
    }
}
