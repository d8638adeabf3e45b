use std::{path::PathBuf, process::ExitCode, str::FromStr};

use anyhow::Context;
use clap::Parser;
use route_matcher::{
    route_file, Flow, HandlerResult, HttpMethod, Request, ResponseWriter, RouteHandler,
    RouteMatcher,
};
use tracing::Level;

/// Resolve a request against a route file.
#[derive(Parser, Debug)]
#[command(version, about)]
struct Args {
    /// Route file, one `METHOD PATH [PRIORITY]` per line
    #[arg(short, long)]
    routes: PathBuf,

    /// Log registration and matching
    #[arg(short, long)]
    verbose: bool,

    /// Request method, e.g. GET
    method: String,

    /// Request target, e.g. /users/42?page=1
    target: String,
}

fn main() -> anyhow::Result<ExitCode> {
    let args = Args::parse();

    tracing_subscriber::fmt()
        .with_max_level(if args.verbose { Level::TRACE } else { Level::WARN })
        .with_writer(std::io::stderr)
        .init();

    let decls = route_file::load_routes(&args.routes)?;
    let mut matcher = RouteMatcher::new();
    route_file::add_all(&mut matcher, &decls, |_| {
        RouteHandler::func(|_: &mut ResponseWriter, _: &mut Request| -> HandlerResult {
            Ok(Flow::Continue)
        })
    })?;
    matcher.register()?;

    let http_method = HttpMethod::from_str(&args.method)
        .with_context(|| format!("unknown method {:?}", args.method))?;

    for hook in matcher.hooks_before(&args.target) {
        println!("before\t{}\t(priority {})", hook.path(), hook.priority());
    }

    let code = match matcher.lookup(http_method, &args.target) {
        Some(m) => {
            println!("route\t{}", m.route());
            for (name, value) in m.params().iter() {
                println!("param\t{}={}", name, value);
            }
            ExitCode::SUCCESS
        }
        None => {
            let allowed = matcher.allowed_methods(&args.target);
            if allowed.is_empty() {
                println!("not found");
            } else {
                let allowed: Vec<_> = allowed.iter().map(|m| m.to_string()).collect();
                println!("method not allowed (allow: {})", allowed.join(", "));
            }
            ExitCode::FAILURE
        }
    };

    for hook in matcher.hooks_after(&args.target) {
        println!("after\t{}\t(priority {})", hook.path(), hook.priority());
    }
    Ok(code)
}
