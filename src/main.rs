use std::path::PathBuf;

use clap::{Arg, ArgAction, ArgMatches, Command};
use svgfont::{DrawMode, FontSession, Point, Rect, SvgFontError, TreeNode};

fn parse_numbers(value: &str, count: usize) -> Result<Vec<f64>, String> {
    let numbers = value
        .split(',')
        .map(|n| n.trim().parse::<f64>())
        .collect::<Result<Vec<_>, _>>()
        .map_err(|e| format!("{}: {}", value, e))?;
    if numbers.len() != count {
        return Err(format!(
            "Expected {} comma separated numbers, got {:?}",
            count, value
        ));
    }
    Ok(numbers)
}

fn parse_point(value: &str) -> Result<Point, String> {
    let n = parse_numbers(value, 2)?;
    Ok(Point::new(n[0], n[1]))
}

fn parse_rect(value: &str) -> Result<Rect, String> {
    let n = parse_numbers(value, 4)?;
    Ok(Rect::new(n[0], n[1], n[2], n[3]))
}

fn parse_char(value: &str) -> Result<char, String> {
    let mut chars = value.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) => Ok(c),
        _ => Err(format!("Expected a single character, got {:?}", value)),
    }
}

fn font_arg() -> Arg {
    Arg::new("font")
        .help("Path to the font definition file")
        .required(true)
        .value_parser(clap::value_parser!(PathBuf))
        .index(1)
}

fn character_arg() -> Arg {
    Arg::new("character")
        .help("The character the glyphs draw")
        .required(true)
        .value_parser(parse_char)
        .index(2)
}

fn command() -> Command {
    Command::new("svgfont")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Assemble SVG stroke fonts")
        .author("Svgfont Developers")
        .subcommand_required(true)
        .arg(
            Arg::new("verbosity")
                .short('v')
                .long("verbosity")
                .help("Set the level of verbosity")
                .global(true)
                .action(ArgAction::Count),
        )
        .subcommand(
            Command::new("list")
                .about("Show the glyphs of a font, grouped by category")
                .arg(font_arg())
                .arg(
                    Arg::new("geometry")
                        .long("geometry")
                        .help("Also print points and limits of every glyph")
                        .action(ArgAction::SetTrue),
                ),
        )
        .subcommand(
            Command::new("add")
                .about("Add glyph files to a character")
                .arg(font_arg())
                .arg(character_arg())
                .arg(
                    Arg::new("files")
                        .required(true)
                        .num_args(1..)
                        .value_parser(clap::value_parser!(PathBuf))
                        .index(3),
                ),
        )
        .subcommand(
            Command::new("import")
                .about("Add glyph files, detecting their characters from their names")
                .arg(font_arg())
                .arg(
                    Arg::new("files")
                        .required(true)
                        .num_args(1..)
                        .value_parser(clap::value_parser!(PathBuf))
                        .index(2),
                ),
        )
        .subcommand(
            Command::new("set")
                .about("Set the geometry of a glyph")
                .arg(font_arg())
                .arg(character_arg())
                .arg(Arg::new("file").required(true).index(3))
                .arg(
                    Arg::new("in")
                        .long("in")
                        .help("In-point as x,y")
                        .value_parser(parse_point),
                )
                .arg(
                    Arg::new("out")
                        .long("out")
                        .help("Out-point as x,y")
                        .value_parser(parse_point),
                )
                .arg(
                    Arg::new("limits")
                        .long("limits")
                        .help("Limits as x0,y0,x1,y1")
                        .value_parser(parse_rect),
                ),
        )
        .subcommand(
            Command::new("remove")
                .about("Remove a glyph, or a character with all its glyphs")
                .arg(font_arg())
                .arg(character_arg())
                .arg(Arg::new("file").index(3)),
        )
        .subcommand(
            Command::new("copy")
                .about("Copy a glyph, or all glyphs of a character, to another character")
                .arg(font_arg())
                .arg(character_arg())
                .arg(Arg::new("file").index(3))
                .arg(
                    Arg::new("to")
                        .long("to")
                        .required(true)
                        .value_parser(parse_char),
                ),
        )
}

fn node_for(args: &ArgMatches, character: char) -> TreeNode {
    match args.get_one::<String>("file") {
        Some(file) => TreeNode::leaf(character, file.as_str()),
        None => TreeNode::CharacterGroup(character),
    }
}

// Glyph files outside the font's folder could not be found again later
fn glyph_files<'a>(
    session: &FontSession,
    args: &'a ArgMatches,
) -> Result<Vec<&'a PathBuf>, SvgFontError> {
    let files: Vec<&PathBuf> = args
        .get_many::<PathBuf>("files")
        .into_iter()
        .flatten()
        .collect();
    for file in &files {
        if let Some(folder) = file.parent().filter(|p| !p.as_os_str().is_empty()) {
            session.check_symbols_folder(folder)?;
        }
    }
    Ok(files)
}

fn run(name: &str, args: &ArgMatches) -> Result<(), SvgFontError> {
    #[allow(clippy::unwrap_used)]
    let font = args.get_one::<PathBuf>("font").unwrap();
    let mut session = FontSession::default();
    session.choose_font_file(font)?;
    session.on_font_ready(|path| log::info!("Font ready: {}", path.display()));
    let character = args
        .try_get_one::<char>("character")
        .ok()
        .flatten()
        .copied();

    match name {
        "list" => {
            print!("{}", session.tree());
            if args.get_flag("geometry") {
                for (c, records) in session.registry().iter() {
                    for record in records.iter() {
                        println!(
                            "{:?} {}: in {:?} out {:?} limits {:?}",
                            c, record.file_name, record.in_point, record.out_point, record.limits
                        );
                    }
                }
            }
            return Ok(());
        }
        "add" => {
            let files = glyph_files(&session, args)?;
            session.set_chosen_symbol(&character.map(String::from).unwrap_or_default());
            let outcome = session.add_symbols(&files)?;
            for path in outcome.unreadable {
                log::warn!("Cannot open {}, added anyway", path.display());
            }
        }
        "import" => {
            let files = glyph_files(&session, args)?;
            let outcome = session.auto_load_symbols(&files)?;
            for leaf in outcome.added {
                log::info!("{:?} <- {}", leaf.character().unwrap_or_default(), leaf.text());
            }
            for path in outcome.unreadable {
                log::warn!("Cannot open {}, added anyway", path.display());
            }
        }
        "set" => {
            let character = character.ok_or(SvgFontError::NoChosenSymbol)?;
            let node = node_for(args, character);
            session.select(node)?;
            if let Some(point) = args.get_one::<Point>("in") {
                if !session.toggle_draw_mode(DrawMode::InPoint) {
                    log::warn!("{:?} is not a letter, in-point left alone", character);
                }
                session.editor_mut().set_in_point(*point);
            }
            if let Some(point) = args.get_one::<Point>("out") {
                if !session.toggle_draw_mode(DrawMode::OutPoint) {
                    log::warn!("{:?} is not a letter, out-point left alone", character);
                }
                session.editor_mut().set_out_point(*point);
            }
            if let Some(limits) = args.get_one::<Rect>("limits") {
                session.toggle_draw_mode(DrawMode::Limits);
                session.editor_mut().set_limits(*limits);
            }
        }
        "remove" => {
            let character = character.ok_or(SvgFontError::NoChosenSymbol)?;
            session.delete(&node_for(args, character))?;
        }
        "copy" => {
            let character = character.ok_or(SvgFontError::NoChosenSymbol)?;
            if let Some(target) = args.get_one::<char>("to") {
                session.set_chosen_symbol(&target.to_string());
            }
            let copied = session.copy_to_chosen_symbol(&node_for(args, character))?;
            log::info!("Copied {} glyphs", copied.len());
        }
        _ => unreachable!("clap only accepts known subcommands"),
    }
    session.save()?;
    Ok(())
}

fn main() {
    let matches = command().get_matches();
    env_logger::Builder::new()
        .filter_level(match matches.get_count("verbosity") {
            0 => log::LevelFilter::Warn,
            1 => log::LevelFilter::Info,
            2 => log::LevelFilter::Debug,
            _ => log::LevelFilter::Trace,
        })
        .init();

    let Some((name, args)) = matches.subcommand() else {
        return;
    };
    if let Err(e) = run(name, args) {
        log::error!("{}", e);
        std::process::exit(1);
    }
}
