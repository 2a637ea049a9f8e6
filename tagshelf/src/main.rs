// This file is part of the product TagShelf.
// SPDX-FileCopyrightText: 2025-2026 Zivatar Limited
// SPDX-License-Identifier: AGPL-3.0-or-later
// The code and documentation in this repository is licensed under the GNU Affero General Public License v3.0 or later (AGPL-3.0-or-later). See LICENSE.

use actix_web::rt::System;
use actix_web::{App, HttpServer, middleware::Logger, web};
use log::{Level, info};
use std::sync::Arc;

use tagshelf::app_state::AppState;
use tagshelf::catalog::YamlCatalog;
use tagshelf::config::ValidatedConfig;
use tagshelf::runtime_paths::RuntimePaths;
use tagshelf::settings::YamlSettingsStore;
use tagshelf::{admin, bootstrap, builtin, public, util};

const HELP_TEXT: &str = "\
Usage: tagshelf [-C <root>]

Serves the storefront and the tag filter admin page.

Options:
  -C <root>   Runtime directory holding config.yaml, catalog.yaml and state/ (default: .)
  -h, --help  Show this help
";

fn main() {
    let exit_code = run();
    std::process::exit(exit_code);
}

fn run() -> i32 {
    let parsed_args = match parse_args() {
        Ok(args) => args,
        Err(error) => {
            eprintln!("❌ Invalid command line arguments: {}", error);
            eprintln!("❌ Use -C <root> to set the runtime directory.");
            return 1;
        }
    };

    if matches!(parsed_args.mode, RunMode::Help) {
        print!("{}", HELP_TEXT);
        return 0;
    }

    let bootstrap = match bootstrap::bootstrap_runtime(&parsed_args.runtime_root) {
        Ok(result) => result,
        Err(error) => {
            eprintln!("❌ Bootstrap error: {}", error);
            eprintln!("❌ Application cannot start with invalid configuration.");
            return 1;
        }
    };

    match System::new().block_on(run_server(bootstrap)) {
        Ok(()) => 0,
        Err(error) => {
            eprintln!("❌ Server failed to start: {}", error);
            1
        }
    }
}

async fn run_server(bootstrap: bootstrap::BootstrapResult) -> std::io::Result<()> {
    let validated_config = Arc::new(bootstrap.validated_config);
    let runtime_paths = bootstrap.runtime_paths;

    let logger = util::build_logger(util::parse_level_filter(&validated_config.logging.level));
    util::init_logger(
        vec![("actix_server".to_string(), Level::Info, Level::Debug)],
        logger,
    )
    .map_err(|error| {
        eprintln!("❌ Failed to initialize logger: {}", error);
        std::io::Error::other(error.to_string())
    })?;

    log_startup_info(&validated_config, &runtime_paths);

    let catalog = match YamlCatalog::load(&runtime_paths.catalog_file) {
        Ok(catalog) => catalog,
        Err(e) => {
            eprintln!("❌ Failed to load catalog: {}", e);
            eprintln!("❌ Application cannot start without a readable catalog.");
            return Err(std::io::Error::other(e.to_string()));
        }
    };
    info!(
        "✅ Catalog loaded: {} categories, {} products",
        catalog.category_count(),
        catalog.product_count()
    );

    let settings = YamlSettingsStore::new(runtime_paths.settings_file.clone());
    let app_state = Arc::new(AppState::new(
        &validated_config.app.name,
        runtime_paths,
        Arc::new(catalog),
        Arc::new(settings),
    ));

    let workers = validated_config.server.workers;
    let bind_address = (validated_config.server.host.clone(), validated_config.server.port);

    HttpServer::new(move || {
        let admin_path = validated_config.admin.path.clone();
        let localhost_only = validated_config.admin.localhost_only;
        let category_base = validated_config.storefront.category_base.clone();

        App::new()
            .wrap(Logger::default())
            .app_data(web::Data::from(validated_config.clone()))
            .app_data(web::Data::from(app_state.clone()))
            .configure(builtin::configure)
            .configure(|cfg| admin::configure(cfg, &admin_path, localhost_only))
            .configure(|cfg| public::configure(cfg, &category_base))
            .default_service(web::to(public::handlers::not_found))
    })
    .workers(workers)
    .bind(bind_address)?
    .run()
    .await
}

fn log_startup_info(config: &ValidatedConfig, runtime_paths: &RuntimePaths) {
    info!("Starting {} - {}", config.app.name, config.app.description);
    info!("Workers: {}", config.server.workers);
    info!(
        "Storefront listening on {}:{}",
        config.server.host, config.server.port
    );
    info!(
        "Category archives under: {}/<slug>",
        config.storefront.category_base
    );
    info!(
        "Tag filter settings at: http://{}:{}{}/tag-filter",
        config.server.host, config.server.port, config.admin.path
    );
    info!("Config file: {}", runtime_paths.config_file.display());
    info!("Catalog file: {}", runtime_paths.catalog_file.display());
    info!("Settings file: {}", runtime_paths.settings_file.display());
    info!("Runtime root: {}", runtime_paths.root.display());
}

#[derive(Debug)]
enum RunMode {
    Serve,
    Help,
}

#[derive(Debug)]
struct ParsedArgs {
    runtime_root: std::path::PathBuf,
    mode: RunMode,
}

fn parse_args() -> Result<ParsedArgs, String> {
    parse_args_from(std::env::args().skip(1))
}

fn parse_args_from<I>(args: I) -> Result<ParsedArgs, String>
where
    I: IntoIterator<Item = String>,
{
    let args: Vec<String> = args.into_iter().collect();
    if args.iter().any(|arg| is_help_flag(arg)) {
        return Ok(ParsedArgs {
            runtime_root: std::path::PathBuf::from("."),
            mode: RunMode::Help,
        });
    }

    let mut args = args.into_iter();
    let mut runtime_root = std::path::PathBuf::from(".");

    while let Some(arg) = args.next() {
        if arg == "--" {
            continue;
        } else if arg == "-C" {
            let value = args
                .next()
                .ok_or_else(|| "Missing value for -C".to_string())?;
            runtime_root = std::path::PathBuf::from(value);
        } else {
            return Err(format!("Unexpected argument '{}'", arg));
        }
    }

    let runtime_root = make_runtime_root_absolute(runtime_root)?;
    Ok(ParsedArgs {
        runtime_root,
        mode: RunMode::Serve,
    })
}

fn is_help_flag(arg: &str) -> bool {
    arg == "-h" || arg == "--help"
}

fn make_runtime_root_absolute(
    runtime_root: std::path::PathBuf,
) -> Result<std::path::PathBuf, String> {
    if runtime_root.is_absolute() {
        return Ok(runtime_root);
    }

    let current_dir = std::env::current_dir()
        .map_err(|error| format!("Failed to resolve current directory: {}", error))?;
    Ok(current_dir.join(runtime_root))
}
