// Zip パズルソルバー CLI

use std::fs;
use std::path::PathBuf;
use std::thread;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use clap::Parser;
use tracing::{info, warn};

use zipsolve::domain::search::{ChannelCapacity, UpdateInterval};
use zipsolve::logging::init_logging;
use zipsolve::presentation::{render_board, SolverState};
use zipsolve::{verify_solution, PuzzleSpec, SearchConfig, SearchOutcome, SolverService};

#[derive(Parser)]
#[command(name = "zipsolve")]
#[command(version)]
#[command(about = "番号順に全セルを一筆書きする Zip パズルを解く")]
struct Cli {
    /// パズル JSON（{"grid": [[...]], "walls": [[[r,c],[r,c]], ...]}）
    puzzle: PathBuf,

    /// 進捗サンプルの間隔（処理フレーム数）
    #[arg(long, default_value_t = zipsolve::constants::DEFAULT_UPDATE_INTERVAL_CHECKS)]
    interval: u64,

    /// 進捗チャネル容量
    #[arg(long, default_value_t = zipsolve::constants::DEFAULT_CHANNEL_CAPACITY)]
    capacity: usize,

    /// ポーリング間隔（ミリ秒）
    #[arg(long = "poll-ms", default_value_t = zipsolve::constants::DEFAULT_POLL_INTERVAL_MS)]
    poll_ms: u64,

    /// 指定秒数を超えたら停止を要求する
    #[arg(long = "timeout-secs")]
    timeout_secs: Option<u64>,

    /// メッセージを JSON Lines で出力する
    #[arg(long)]
    json: bool,

    /// 詳細ログを有効にする
    #[arg(short, long)]
    verbose: bool,

    /// ログの出力先ファイル
    #[arg(long = "log-file")]
    log_file: Option<PathBuf>,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose, cli.log_file.as_deref())?;

    let text = fs::read_to_string(&cli.puzzle)
        .with_context(|| format!("パズルを読み込めません: {}", cli.puzzle.display()))?;
    let spec: PuzzleSpec = serde_json::from_str(&text)
        .with_context(|| format!("パズル JSON が不正です: {}", cli.puzzle.display()))?;
    let puzzle = spec.to_puzzle().context("パズルが不正です")?;

    let config = SearchConfig {
        update_interval: UpdateInterval::new(cli.interval)?,
        channel_capacity: ChannelCapacity::new(cli.capacity)?,
        poll_interval_ms: cli.poll_ms,
    };
    let mut service = SolverService::new(config)?;
    let poll = Duration::from_millis(service.config().poll_interval_ms);
    let deadline = cli
        .timeout_secs
        .map(|s| Instant::now() + Duration::from_secs(s));

    if !cli.json {
        println!("{}", render_board(&puzzle, None));
    }

    let mut state = SolverState::new();
    state.start();
    let mut handle = service.start_puzzle(puzzle.clone())?;

    while state.is_running() {
        thread::sleep(poll);
        let msgs = handle.poll()?;
        if cli.json {
            for msg in &msgs {
                println!("{}", serde_json::to_string(msg)?);
            }
        }
        if state.apply_all(msgs) && !cli.json {
            eprintln!("{}", state.status_line());
        }
        if let Some(deadline) = deadline {
            if Instant::now() >= deadline && !handle.is_stop_requested() {
                warn!("制限時間に達したため停止を要求します");
                handle.request_stop();
            }
        }
    }

    let summary = handle.outcome().map(|o| handle.summary(o));
    let outcome = handle.wait()?;
    if let SearchOutcome::Found { solution, .. } = &outcome {
        verify_solution(&puzzle, solution).context("探索結果の検証に失敗しました")?;
        if !cli.json {
            println!("{}", render_board(&puzzle, Some(solution)));
        }
    }
    if let Some(summary) = summary {
        info!(
            outcome = ?summary.outcome,
            checked = summary.checked,
            elapsed = summary.elapsed_seconds,
            rate = summary.checks_per_second,
            "完了"
        );
    }
    Ok(())
}
