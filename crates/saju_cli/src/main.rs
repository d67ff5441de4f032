use clap::{Parser, Subcommand};
use saju_base::ALL_ELEMENTS;
use saju_chart::{
    BirthInput, Chart, Position, WeighConfig, resolve_yongsin, weigh,
};
use saju_search::{
    Gender, daeun, detect_relations, find_best_and_worst, saeun, score_compatibility, wolun,
};
use saju_solar::TermEngine;
use saju_time::LocalDateTime;

#[derive(Parser)]
#[command(name = "saju", about = "Saju four-pillar CLI")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Four pillars for a birth instant
    Chart {
        /// Birth date (YYYY-MM-DD, KST)
        #[arg(long)]
        date: String,
        /// Birth time (HH:MM); omit when unknown
        #[arg(long)]
        time: Option<String>,
    },
    /// Weighted five-element distribution and ten gods
    Elements {
        /// Birth date (YYYY-MM-DD, KST)
        #[arg(long)]
        date: String,
        /// Birth time (HH:MM); omit when unknown
        #[arg(long)]
        time: Option<String>,
    },
    /// Favorable-element recommendation
    Yongsin {
        /// Birth date (YYYY-MM-DD, KST)
        #[arg(long)]
        date: String,
        /// Birth time (HH:MM); omit when unknown
        #[arg(long)]
        time: Option<String>,
    },
    /// Decade-fortune timeline
    Daeun {
        /// Birth date (YYYY-MM-DD, KST)
        #[arg(long)]
        date: String,
        /// Birth time (HH:MM); omit when unknown
        #[arg(long)]
        time: Option<String>,
        /// Subject sex: male or female
        #[arg(long)]
        gender: String,
    },
    /// Year-fortune entries for a calendar-year range
    Saeun {
        /// Birth date (YYYY-MM-DD, KST)
        #[arg(long)]
        date: String,
        /// Birth time (HH:MM); omit when unknown
        #[arg(long)]
        time: Option<String>,
        /// First calendar year
        #[arg(long)]
        from: i32,
        /// Last calendar year (inclusive)
        #[arg(long)]
        to: i32,
    },
    /// Month-fortune entries for a saju year
    Wolun {
        /// Birth date (YYYY-MM-DD, KST)
        #[arg(long)]
        date: String,
        /// Birth time (HH:MM); omit when unknown
        #[arg(long)]
        time: Option<String>,
        /// Target saju year
        #[arg(long)]
        year: i32,
        /// Reference instant for the current-month marker
        /// (YYYY-MM-DDTHH:MM, default: start of the target year)
        #[arg(long)]
        now: Option<String>,
    },
    /// Structural relations among adjacent pillars
    Relations {
        /// Birth date (YYYY-MM-DD, KST)
        #[arg(long)]
        date: String,
        /// Birth time (HH:MM); omit when unknown
        #[arg(long)]
        time: Option<String>,
    },
    /// Compatibility score for two birth instants
    Compat {
        /// First birth date (YYYY-MM-DD, KST)
        #[arg(long)]
        date_a: String,
        /// First birth time (HH:MM); omit when unknown
        #[arg(long)]
        time_a: Option<String>,
        /// Second birth date (YYYY-MM-DD, KST)
        #[arg(long)]
        date_b: String,
        /// Second birth time (HH:MM); omit when unknown
        #[arg(long)]
        time_b: Option<String>,
    },
    /// Best and worst day/month pillars of a target birth year
    Match {
        /// Reference birth date (YYYY-MM-DD, KST)
        #[arg(long)]
        date: String,
        /// Reference birth time (HH:MM); omit when unknown
        #[arg(long)]
        time: Option<String>,
        /// Target birth year to scan
        #[arg(long)]
        year: i32,
    },
}

fn parse_date(s: &str) -> (i32, u32, u32) {
    let parts: Vec<&str> = s.split('-').collect();
    if parts.len() != 3 {
        eprintln!("Invalid date: {s} (expected YYYY-MM-DD)");
        std::process::exit(1);
    }
    let parse = |v: &str, what: &str| -> i64 {
        v.parse::<i64>().unwrap_or_else(|e| {
            eprintln!("Invalid {what} '{v}': {e}");
            std::process::exit(1);
        })
    };
    (
        parse(parts[0], "year") as i32,
        parse(parts[1], "month") as u32,
        parse(parts[2], "day") as u32,
    )
}

fn parse_time(s: &str) -> (u32, u32) {
    let parts: Vec<&str> = s.split(':').collect();
    if parts.len() != 2 {
        eprintln!("Invalid time: {s} (expected HH:MM)");
        std::process::exit(1);
    }
    let parse = |v: &str, what: &str| -> u32 {
        v.parse::<u32>().unwrap_or_else(|e| {
            eprintln!("Invalid {what} '{v}': {e}");
            std::process::exit(1);
        })
    };
    (parse(parts[0], "hour"), parse(parts[1], "minute"))
}

fn parse_instant(s: &str) -> LocalDateTime {
    let Some((date_part, time_part)) = s.split_once('T') else {
        eprintln!("Invalid instant: {s} (expected YYYY-MM-DDTHH:MM)");
        std::process::exit(1);
    };
    let (year, month, day) = parse_date(date_part);
    let (hour, minute) = parse_time(time_part);
    LocalDateTime::new(year, month, day, hour, minute, 0.0)
}

fn parse_gender(s: &str) -> Gender {
    match s.to_ascii_lowercase().as_str() {
        "male" | "m" => Gender::Male,
        "female" | "f" => Gender::Female,
        _ => {
            eprintln!("Invalid gender: {s} (male or female)");
            std::process::exit(1);
        }
    }
}

fn build(engine: &TermEngine, date: &str, time: Option<&str>) -> Chart {
    let (year, month, day) = parse_date(date);
    let input = BirthInput {
        year,
        month,
        day,
        time: time.map(parse_time),
    };
    saju_chart::build_chart(engine, &input).unwrap_or_else(|e| {
        eprintln!("Failed to build chart: {e}");
        std::process::exit(1);
    })
}

fn print_chart(chart: &Chart) {
    println!("Birth     {}", chart.birth);
    println!(
        "Saju year {} / month ordinal {} ({} - {})",
        chart.terms.saju_year,
        chart.terms.month_ordinal,
        chart.terms.current.term.name(),
        chart.terms.next.term.name()
    );
    for position in [Position::Year, Position::Month, Position::Day, Position::Hour] {
        match chart.pillar(position) {
            Some(pillar) if position != Position::Hour || chart.has_hour => {
                println!(
                    "{:<6} {}  stem {:<14} branch {:<14} stage {}",
                    position.name(),
                    pillar.cycle,
                    pillar.stem_ten_god.name(),
                    pillar.branch_ten_god.name(),
                    pillar.stage.name()
                );
            }
            _ => println!("{:<6} (unknown)", position.name()),
        }
    }
}

fn main() {
    let cli = Cli::parse();
    let engine = TermEngine::new();

    match cli.command {
        Commands::Chart { date, time } => {
            let chart = build(&engine, &date, time.as_deref());
            print_chart(&chart);
        }

        Commands::Elements { date, time } => {
            let chart = build(&engine, &date, time.as_deref());
            let weighing = weigh(&chart, chart.has_hour, &WeighConfig::default());
            for element in ALL_ELEMENTS {
                println!(
                    "{:<6} {:>3}%  (weight {:.3})",
                    element.name(),
                    weighing.elements.percentage(element),
                    weighing.elements.weight(element)
                );
            }
            println!();
            for (i, weight) in weighing.ten_gods.weights.iter().enumerate() {
                if *weight > 0.0 {
                    println!(
                        "{:<14} {:.3}",
                        saju_base::ALL_TEN_GODS[i].name(),
                        weight
                    );
                }
            }
        }

        Commands::Yongsin { date, time } => {
            let chart = build(&engine, &date, time.as_deref());
            let weighing = weigh(&chart, chart.has_hour, &WeighConfig::default());
            let result = resolve_yongsin(&weighing.elements);
            println!("Primary  {}", result.primary.name());
            if let Some(mediator) = result.mediator {
                println!("Mediator {}", mediator.name());
            }
            for line in &result.rationale {
                println!("- {line}");
            }
        }

        Commands::Daeun { date, time, gender } => {
            let chart = build(&engine, &date, time.as_deref());
            let timeline = daeun(&chart, parse_gender(&gender));
            println!(
                "Direction {}  start age {} ({} months)",
                if timeline.forward { "forward" } else { "backward" },
                timeline.start_age,
                timeline.start_months
            );
            for period in &timeline.periods {
                println!(
                    "age {:>3}  ({})  {}  {} / {}  {}",
                    period.label,
                    period.calendar_year,
                    period.cycle,
                    period.stem_ten_god.name(),
                    period.branch_ten_god.name(),
                    period.stage.name()
                );
            }
        }

        Commands::Saeun {
            date,
            time,
            from,
            to,
        } => {
            let chart = build(&engine, &date, time.as_deref());
            let periods = saeun(&chart, from, to).unwrap_or_else(|e| {
                eprintln!("{e}");
                std::process::exit(1);
            });
            for period in &periods {
                println!(
                    "{}  (age {:>3})  {}  {} / {}  {}",
                    period.calendar_year,
                    period.label,
                    period.cycle,
                    period.stem_ten_god.name(),
                    period.branch_ten_god.name(),
                    period.stage.name()
                );
            }
        }

        Commands::Wolun {
            date,
            time,
            year,
            now,
        } => {
            let chart = build(&engine, &date, time.as_deref());
            let now = now.map_or_else(
                || LocalDateTime::new(year, 1, 1, 0, 0, 0.0),
                |s| parse_instant(&s),
            );
            let entries = wolun(&engine, &chart, year, &now).unwrap_or_else(|e| {
                eprintln!("{e}");
                std::process::exit(1);
            });
            for entry in &entries {
                println!(
                    "{:<10} from {}  {}  {} / {}  {}{}",
                    entry.term.name(),
                    entry.term_instant,
                    entry.period.cycle,
                    entry.period.stem_ten_god.name(),
                    entry.period.branch_ten_god.name(),
                    entry.period.stage.name(),
                    if entry.is_current { "  <- current" } else { "" }
                );
            }
        }

        Commands::Relations { date, time } => {
            let chart = build(&engine, &date, time.as_deref());
            let relations = detect_relations(&chart, chart.has_hour);
            if relations.is_empty() {
                println!("No structural relations among adjacent pillars.");
            }
            for relation in &relations {
                let span: Vec<&str> =
                    relation.positions.iter().map(|p| p.name()).collect();
                match relation.kind.resulting_element() {
                    Some(element) => println!(
                        "{:<20} {}  -> {}",
                        relation.kind.name(),
                        span.join("-"),
                        element.name()
                    ),
                    None => println!("{:<20} {}", relation.kind.name(), span.join("-")),
                }
            }
        }

        Commands::Compat {
            date_a,
            time_a,
            date_b,
            time_b,
        } => {
            let chart_a = build(&engine, &date_a, time_a.as_deref());
            let chart_b = build(&engine, &date_b, time_b.as_deref());
            let result =
                score_compatibility(&chart_a, chart_a.has_hour, &chart_b, chart_b.has_hour);
            println!("Total {}", result.total);
            println!(
                "branch {:+.0}  stem {:+.0}  element {:+.0}  ten-god {:+.0}  stage {:+.0}  special {:+.0}",
                result.scores.branch,
                result.scores.stem,
                result.scores.element,
                result.scores.ten_god_group,
                result.scores.twelve_stage,
                result.scores.special
            );
            println!(
                "attachment {} / {}",
                result.attachment_a.name(),
                result.attachment_b.name()
            );
            for line in &result.rationale {
                println!("- {line}");
            }
        }

        Commands::Match { date, time, year } => {
            let chart = build(&engine, &date, time.as_deref());
            let result = find_best_and_worst(&chart, chart.has_hour, year);
            println!(
                "Target year {} ({}), {} candidates",
                result.target_year,
                result.year_cycle,
                result.stats.candidates_scored
            );
            for (label, group) in [("Best", &result.best), ("Worst", &result.worst)] {
                println!("{label}:");
                for candidate in group {
                    let example = candidate.example_date.as_ref().map_or_else(
                        || "-".to_string(),
                        |d| format!("{:04}-{:02}-{:02}", d.year, d.month, d.day),
                    );
                    println!(
                        "  day {}  month {} (ordinal {:>2})  score {:>3}  e.g. {}",
                        candidate.day_cycle,
                        candidate.month_cycle,
                        candidate.month_ordinal,
                        candidate.score,
                        example
                    );
                }
            }
            println!("Score histogram (buckets of 5):");
            for (i, count) in result.distribution.iter().enumerate() {
                if *count > 0 {
                    println!("  {:>3}-{:>3}: {}", i * 5, (i * 5 + 4).min(100), count);
                }
            }
        }
    }
}
