use clap::Parser;
use screen_time_survey::{cli, config, error, export, pages, store};
use cli::{Cli, Commands};
use config::Config;
use error::Result;
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let config = Config::load()?;
    let data_dir = cli.data_dir.as_deref();
    let tabular = store::TabularStore::new(config.csv_path(data_dir));
    let aggregate = store::AggregateStore::new(config.json_path(data_dir));

    match cli.command {
        Commands::Survey { entries } => {
            pages::survey::run(&tabular, &entries, config.max_entries)?;
        }

        Commands::Show => {
            pages::survey::show(&tabular)?;
        }

        Commands::Visuals { min_hours, selected, json, interactive } => {
            if interactive {
                pages::visuals::run_interactive(&tabular, &aggregate, min_hours, &selected)?;
            } else {
                pages::visuals::run(&tabular, &aggregate, min_hours, &selected, json)?;
            }
        }

        Commands::Export { output, min_hours, selected } => {
            let output = output.unwrap_or_else(|| config.data_dir(data_dir));
            export::run(&tabular, &aggregate, &output, min_hours, &selected, &config.export_title)?;
            println!("\n✅ エクスポート完了");
        }

        Commands::Config { set_data_dir, show } => {
            let mut config = config;

            if let Some(dir) = set_data_dir {
                config.set_data_dir(dir)?;
                println!("✔ データフォルダを設定しました");
            }

            if show {
                println!("設定:");
                println!("  データフォルダ: {}", config.data_dir(None).display());
                println!("  表データ: {}", config.csv_file);
                println!("  集計データ: {}", config.json_file);
                println!("  入力枠数: {}", config.max_entries);
                println!("  エクスポートタイトル: {}", config.export_title);
            }
        }
    }

    Ok(())
}

/// ログはstderrへ（stdoutは表示用）
fn init_logging(verbose: bool) {
    let level = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::new(format!("screen_time_survey={level},screen_time_common={level}"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}
