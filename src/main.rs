use clap::Parser;
use std::path::Path;

mod catalog;
mod cli;
mod config;
mod context;
mod errors;
mod export;
mod generate;
mod log;
mod prompt;
mod provider;
mod session;
mod ux;
mod wire;

use catalog::StepKey;
use config::Config;
use errors::MemoError;
use provider::DynGenerator;
use session::Session;

fn resolve_step(arg: Option<&str>, session: &Session) -> Result<StepKey, MemoError> {
    match arg {
        None => Ok(session.current().key),
        Some(raw) => {
            if let Ok(n) = raw.parse::<usize>() {
                if n == 0 {
                    return Err(MemoError::InvalidInput("steps are numbered from 1".into()));
                }
                return catalog::step_at(n - 1).map(|s| s.key).ok_or_else(|| {
                    MemoError::InvalidInput(format!("step number out of range: {raw}"))
                });
            }
            raw.parse::<StepKey>()
        }
    }
}

async fn run_generation(
    prov: &Option<DynGenerator>,
    cfg: &Config,
    session: &mut Session,
    key: StepKey,
    args: &cli::Args,
) {
    let Some(prov) = prov else {
        ux::print_error(&MemoError::MissingCredential);
        return;
    };

    let missing = session.missing_references(key);
    if !missing.is_empty() {
        ux::warn_missing(key, &missing);
    }

    let spec = catalog::spec_of(key);
    let pb = ux::spinner(key, spec.use_search);
    let outcome = generate::run_step(prov.as_ref(), cfg, session, key, args.debug).await;
    pb.finish_and_clear();

    match outcome {
        Ok((req, resp)) => {
            match log::save_call(&req, &resp, cfg, args.save_request, args.save_response) {
                Ok(saved) => {
                    if args.debug {
                        log::print_saved_paths(req.step.key(), &saved);
                    }
                }
                Err(e) => eprintln!("warning: could not save transcript: {e}"),
            }
            ux::print_generated(key);
            ux::show_step(session, key);
        }
        Err(e) => ux::print_error(&e),
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = cli::Args::parse();

    let mut cfg = config::load(args.config.as_deref())?;
    if let Some(m) = &args.model {
        cfg.model = m.clone();
    }
    if let Some(t) = args.temperature {
        cfg.temperature = t;
    }
    if let Some(t) = args.timeout_secs {
        cfg.timeout_secs = t;
    }
    if let Some(o) = &args.out {
        cfg.out_file = o.clone();
    }

    ux::banner();

    let inputs = match &args.inputs {
        Some(path) => {
            let raw = fs_err::read_to_string(path)?;
            let sets = match context::parse_input_sets(&raw) {
                Ok(sets) => sets,
                Err(e) => {
                    ux::print_error(&e);
                    return Ok(());
                }
            };
            match sets.into_iter().nth(args.input_index) {
                Some(set) => set,
                None => {
                    ux::print_error(&MemoError::InvalidInput(format!(
                        "input index {} is out of range",
                        args.input_index
                    )));
                    return Ok(());
                }
            }
        }
        None => ux::collect_inputs(),
    };

    let api_key = args
        .api_key
        .clone()
        .or_else(|| std::env::var("GEMINI_API_KEY").ok())
        .unwrap_or_default();

    // Without a key the wizard still browses, edits, and exports; only
    // generation is refused, at the moment it is asked for.
    let prov = match provider::make_generator(api_key, &cfg) {
        Ok(p) => Some(p),
        Err(e) => {
            ux::print_error(&e);
            None
        }
    };

    let mut session = Session::new(inputs);
    ux::show_workflow(&session);
    ux::help();

    loop {
        let Some(line) = ux::read_command() else { break };
        if line.is_empty() {
            continue;
        }
        let mut parts = line.split_whitespace();
        let cmd = parts.next().unwrap_or("");
        let arg = parts.next();

        match cmd {
            "list" | "ls" => ux::show_workflow(&session),
            "show" => match resolve_step(arg, &session) {
                Ok(key) => ux::show_step(&session, key),
                Err(e) => ux::print_error(&e),
            },
            "gen" | "generate" => match resolve_step(arg, &session) {
                Ok(key) => run_generation(&prov, &cfg, &mut session, key, &args).await,
                Err(e) => ux::print_error(&e),
            },
            "regen" | "regenerate" => match resolve_step(arg, &session) {
                Ok(key) => {
                    session.clear(key);
                    run_generation(&prov, &cfg, &mut session, key, &args).await;
                }
                Err(e) => ux::print_error(&e),
            },
            "edit" => match resolve_step(arg, &session) {
                Ok(key) => {
                    let text = ux::read_multiline();
                    session.record(key, text);
                    ux::show_step(&session, key);
                }
                Err(e) => ux::print_error(&e),
            },
            "next" => {
                session.advance();
                ux::show_step(&session, session.current().key);
            }
            "jump" => {
                if arg.is_none() {
                    println!("usage: jump <step key|step number>");
                    continue;
                }
                match resolve_step(arg, &session) {
                    Ok(key) => {
                        session.jump(key);
                        ux::show_step(&session, key);
                    }
                    Err(e) => ux::print_error(&e),
                }
            }
            "reset" => {
                if ux::confirm("Clear every result and restart?") {
                    session.reset();
                    ux::show_workflow(&session);
                }
            }
            "export" => {
                let path = arg.map(str::to_string).unwrap_or_else(|| cfg.out_file.clone());
                match export::write_document(Path::new(&path), &session.results) {
                    Ok(p) => ux::print_exported(&p),
                    Err(e) => ux::print_failure(&e),
                }
            }
            "help" => ux::help(),
            "quit" | "exit" | "q" => break,
            other => println!("unknown command: {other} (try 'help')"),
        }
    }

    Ok(())
}
