use anyhow::Context;
use clap::Parser;
use tracing_subscriber::EnvFilter;
use xray_eval::{cli, config, dataset, evaluator, export, report};
use cli::{Cli, Commands};
use config::Config;
use xray_eval_common::{CategoryMap, CategoryResolver};

fn init_logging(verbose: bool) {
    let level = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match cli.command {
        Commands::Evaluate { input, ai_column, ground_truth_column, max_rows, output, format } => {
            println!("🩻 xray-eval - 所見評価\n");
            let config = Config::load()
                .context("設定ファイルの読み込みに失敗")?
                .with_overrides(ai_column, ground_truth_column, max_rows);

            // 1. データセット読み込み
            println!("[1/3] データセットを読み込み中...");
            let table = dataset::load_table(&input, config.max_rows)
                .with_context(|| format!("read {}", input.display()))?;
            tracing::info!(columns = ?table.headers, "ヘッダー");
            let columns = dataset::FindingColumns::locate(
                &table.headers,
                &config.ai_column,
                &config.ground_truth_column,
            )?;
            println!("✔ {}行を読み込み\n", table.len());

            // 2. 分類・集計
            println!("[2/3] 評価中...");
            let resolver = CategoryResolver::chest_xray()?;
            let options = evaluator::EvaluateOptions { show_progress: !cli.verbose };
            let result = evaluator::evaluate_table(&table, &columns, &resolver, options);
            if result.skipped.is_empty() {
                println!("✔ 評価完了\n");
            } else {
                println!("✔ 評価完了（{}行をスキップ）\n", result.skipped.len());
            }

            // 3. 出力
            println!("[3/3] 結果");
            report::print_report(&result);

            if let Some(output) = output {
                let written = export::export_report(&result, &input, &format, &output)
                    .with_context(|| format!("write {}", output.display()))?;
                for path in written {
                    println!("✔ 出力: {}", path.display());
                }
            }

            println!("\n✅ 完了");
        }

        Commands::Categories => {
            print!("{}", report::format_category_map(&CategoryMap::chest_xray()));
        }

        Commands::Resolve { labels } => {
            let resolver = CategoryResolver::chest_xray()?;
            for label in &labels {
                let category = resolver.resolve(label);
                if resolver.is_mapped(label) {
                    println!("{} → {}", label, category);
                } else {
                    println!("{} → {} (未登録)", label, category);
                }
            }
        }

        Commands::Config { show, ai_column, ground_truth_column, max_rows, clear_max_rows } => {
            // 壊れた設定ファイルもこのコマンドで上書きできるようにする
            let mut config = Config::load_or_default()?;
            let changed = ai_column.is_some()
                || ground_truth_column.is_some()
                || max_rows.is_some()
                || clear_max_rows;

            config = config.with_overrides(ai_column, ground_truth_column, max_rows);
            if clear_max_rows {
                config.max_rows = None;
            }

            if changed {
                config.save()?;
                println!("✔ 設定を保存しました");
            }

            if show || !changed {
                println!("設定:");
                println!("  AI所見列: {:?}", config.ai_column);
                println!("  正解列: {:?}", config.ground_truth_column);
                match config.max_rows {
                    Some(n) => println!("  最大行数: {}", n),
                    None => println!("  最大行数: 制限なし"),
                }
            }
        }
    }

    Ok(())
}
