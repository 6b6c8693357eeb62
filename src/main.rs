use std::env;

use chrono::Utc;
use rand::rngs::StdRng;
use rand::SeedableRng;
use simplelog::{Config, LevelFilter, SimpleLogger};

use mingli_core::{divination, report, scoring, BirthMoment, BloodType, ChartReport, NameChart};

#[derive(Debug, PartialEq)]
enum Command {
    Chart {
        year: i32,
        month: u32,
        day: u32,
        hour: u32,
        json: bool,
    },
    Name {
        name: String,
    },
    Match {
        first: String,
        second: String,
    },
    Blood {
        first: BloodType,
        second: BloodType,
    },
    Tarot {
        seed: Option<u64>,
    },
    Yijing {
        seed: Option<u64>,
    },
}

fn main() {
    let _ = SimpleLogger::init(LevelFilter::Warn, Config::default());

    let args: Vec<String> = env::args().skip(1).collect();
    match parse_command(&args).and_then(run) {
        Ok(out) => println!("{out}"),
        Err(err) => {
            eprintln!("{err}");
            eprintln!("{}", usage());
            std::process::exit(1);
        }
    }
}

fn usage() -> &'static str {
    "usage:\n  \
     mingli_core chart YEAR MONTH DAY HOUR [--json]\n  \
     mingli_core name NAME\n  \
     mingli_core match NAME1 NAME2\n  \
     mingli_core blood TYPE1 TYPE2\n  \
     mingli_core tarot [SEED]\n  \
     mingli_core yijing [SEED]"
}

fn parse_command(args: &[String]) -> Result<Command, String> {
    let (head, rest) = args.split_first().ok_or("missing command")?;
    match head.as_str() {
        "chart" => {
            let json = rest.iter().any(|a| a == "--json");
            let parts: Vec<&String> = rest.iter().filter(|a| *a != "--json").collect();
            if parts.len() != 4 {
                return Err("chart takes YEAR MONTH DAY HOUR".to_string());
            }
            Ok(Command::Chart {
                year: parse_number(parts[0], "YEAR")?,
                month: parse_number(parts[1], "MONTH")?,
                day: parse_number(parts[2], "DAY")?,
                hour: parse_number(parts[3], "HOUR")?,
                json,
            })
        }
        "name" => match rest {
            [name] => Ok(Command::Name { name: name.clone() }),
            _ => Err("name takes one NAME".to_string()),
        },
        "match" => match rest {
            [first, second] => Ok(Command::Match {
                first: first.clone(),
                second: second.clone(),
            }),
            _ => Err("match takes NAME1 NAME2".to_string()),
        },
        "blood" => match rest {
            [first, second] => Ok(Command::Blood {
                first: parse_blood(first)?,
                second: parse_blood(second)?,
            }),
            _ => Err("blood takes TYPE1 TYPE2".to_string()),
        },
        "tarot" => Ok(Command::Tarot {
            seed: parse_seed(rest)?,
        }),
        "yijing" => Ok(Command::Yijing {
            seed: parse_seed(rest)?,
        }),
        other => Err(format!("unknown command '{other}'")),
    }
}

fn parse_number<T: std::str::FromStr>(text: &str, label: &str) -> Result<T, String> {
    text.parse()
        .map_err(|_| format!("{label} '{text}' is not a number"))
}

fn parse_blood(text: &str) -> Result<BloodType, String> {
    BloodType::parse(text).ok_or_else(|| format!("unknown blood type '{text}'"))
}

fn parse_seed(rest: &[String]) -> Result<Option<u64>, String> {
    match rest {
        [] => Ok(None),
        [seed] => parse_number(seed, "SEED").map(Some),
        _ => Err("at most one SEED".to_string()),
    }
}

fn seeded_rng(seed: Option<u64>) -> StdRng {
    let seed = seed.unwrap_or_else(|| Utc::now().timestamp() as u64);
    log::debug!("divination seed {seed}");
    StdRng::seed_from_u64(seed)
}

fn run(command: Command) -> Result<String, String> {
    match command {
        Command::Chart {
            year,
            month,
            day,
            hour,
            json,
        } => {
            let moment = BirthMoment::new(year, month, day, hour).map_err(|e| e.to_string())?;
            let chart = ChartReport::calculate(&moment);
            if json {
                serde_json::to_string_pretty(&chart).map_err(|e| e.to_string())
            } else {
                Ok(report::chart_text(&chart))
            }
        }
        Command::Name { name } => {
            let chart = NameChart::from_name(&name).map_err(|e| e.to_string())?;
            Ok(report::name_text(&chart))
        }
        Command::Match { first, second } => {
            let a = NameChart::from_name(&first).map_err(|e| e.to_string())?;
            let b = NameChart::from_name(&second).map_err(|e| e.to_string())?;
            let score = scoring::score_match(&a.grid, &b.grid);
            Ok(report::match_text(&a, &b, &score))
        }
        Command::Blood { first, second } => Ok(report::blood_text(first, second)),
        Command::Tarot { seed } => {
            let mut rng = seeded_rng(seed);
            let cards = divination::draw_tarot(&mut rng, 3);
            Ok(report::tarot_text(&cards))
        }
        Command::Yijing { seed } => {
            let mut rng = seeded_rng(seed);
            let cast = divination::cast_hexagram(&mut rng);
            Ok(report::cast_text(&cast))
        }
    }
}
