//! 发送端 TCP 回放
//!
//! 读取同一条流在发送端/接收端的 JSON 抓包，回放发送端行为并输出各项指标。

use std::fs;
use std::net::IpAddr;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::Parser;
use tcp_replay_rs::analyze::{
    DroppedPacketsAnalyzer, FastRetransmitSackAnalyzer, PacketAnalyzer, PacketOutOfOrderAnalyzer,
    SingleDupAckRetransmitSackAnalyzer, SpuriousReorderRetransmissionAnalyzer,
    SpuriousRetransmissionAnalyzer, build_conditions,
};
use tcp_replay_rs::capture::{EventLog, TrueBytesInFlightCapture};
use tcp_replay_rs::metric::{FlowRun, Metric};
use tcp_replay_rs::replay::{
    DUPLICATE_ACK_THRESHOLD, ReplayConfig, SMSS, TIMESTAMP_TOLERANCE, UNSENT_BYTES_THRESHOLD,
};
use tcp_replay_rs::trace::{Capture, Communication, TraceError};
use tracing::{info, warn};

#[derive(Debug, Parser)]
#[command(name = "replay-trace", about = "回放发送端抓包，重建 TCP 重传/超时/恢复行为并计算指标")]
struct Args {
    /// 发送端抓包（JSON）
    #[arg(long)]
    sender: PathBuf,

    /// 接收端抓包（JSON）
    #[arg(long)]
    receiver: PathBuf,

    /// 流的源地址；不填则取发送端抓包第一个包
    #[arg(long, requires = "destination")]
    source: Option<IpAddr>,

    /// 流的目的地址
    #[arg(long, requires = "source")]
    destination: Option<IpAddr>,

    /// 要计算的指标（可重复）；不填则计算全部
    #[arg(long = "metric", value_enum)]
    metrics: Vec<Metric>,

    /// 报文段长度（字节）
    #[arg(long, default_value_t = SMSS)]
    smss: u64,

    /// 重复 ACK 阈值
    #[arg(long, default_value_t = DUPLICATE_ACK_THRESHOLD)]
    dup_ack_threshold: u32,

    /// 空闲超时阈值（毫秒）
    #[arg(long, default_value_t = 500)]
    rto_idle_ms: u64,

    /// unsent RTO 等待时间的字节阈值
    #[arg(long, default_value_t = UNSENT_BYTES_THRESHOLD)]
    unsent_bytes: u64,

    /// 输出各分析器标记的包数
    #[arg(long, default_value_t = false)]
    conditions: bool,

    /// 输出回放事件 JSON 文件；不填则不生成
    #[arg(long)]
    events_json: Option<PathBuf>,

    /// 输出真实在途段数采样 JSON 文件；不填则不生成
    #[arg(long)]
    in_flight_json: Option<PathBuf>,
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .with_file(true)
        .with_line_number(true)
        .with_target(true)
        .init();

    let args = Args::parse();
    match run(args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {err}");
            ExitCode::FAILURE
        }
    }
}

#[derive(Debug, thiserror::Error)]
enum CliError {
    #[error(transparent)]
    Trace(#[from] TraceError),
    #[error("failed to write {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to encode json: {0}")]
    Encode(#[from] serde_json::Error),
}

fn write_json<T: serde::Serialize>(path: &Path, value: &T) -> Result<(), CliError> {
    let json = serde_json::to_string_pretty(value)?;
    fs::write(path, json).map_err(|source| CliError::Write {
        path: path.to_path_buf(),
        source,
    })?;
    eprintln!("wrote {}", path.display());
    Ok(())
}

fn run(args: Args) -> Result<(), CliError> {
    let sender = Capture::from_json_file(&args.sender)?;
    let receiver = Capture::from_json_file(&args.receiver)?;
    info!(
        sender_packets = sender.len(),
        receiver_packets = receiver.len(),
        "已加载抓包"
    );
    if receiver.is_empty() {
        warn!(path = %args.receiver.display(), "接收端抓包为空，跨抓包指标将全部视为丢失");
    }

    let addresses = match (args.source, args.destination) {
        (Some(source), Some(destination)) => Communication {
            source,
            destination,
        },
        _ => sender.first_addresses().ok_or_else(|| TraceError::Empty {
            path: args.sender.clone(),
        })?,
    };
    info!(source = %addresses.source, destination = %addresses.destination, "流地址");

    let cfg = ReplayConfig {
        smss: args.smss,
        dup_ack_threshold: args.dup_ack_threshold,
        rto_idle_threshold: args.rto_idle_ms as f64 / 1_000.0,
        timestamp_tolerance: TIMESTAMP_TOLERANCE,
    };
    let run = FlowRun::new(&sender, &receiver, addresses)
        .with_config(cfg)
        .with_unsent_bytes_threshold(args.unsent_bytes);

    let metrics = if args.metrics.is_empty() {
        Metric::ALL.to_vec()
    } else {
        args.metrics.clone()
    };
    for metric in metrics {
        match metric.calculate(&run) {
            Some(value) => println!("metric {:?} name=\"{}\" value={value}", metric, metric.name()),
            None => println!("metric {:?} name=\"{}\" value=none", metric, metric.name()),
        }
    }

    if args.conditions {
        let dropped = DroppedPacketsAnalyzer::new(&sender, &receiver);
        let sack = FastRetransmitSackAnalyzer::new(&sender);
        let single = SingleDupAckRetransmitSackAnalyzer::new(&sender, &receiver);
        let reorder_spurious = SpuriousReorderRetransmissionAnalyzer::new(&sender, &receiver);
        let spurious = SpuriousRetransmissionAnalyzer::new(&sender, &receiver);
        let out_of_order = PacketOutOfOrderAnalyzer::new(&sender, &receiver);
        let analyzers: [&dyn PacketAnalyzer; 6] = [
            &dropped,
            &sack,
            &single,
            &reorder_spurious,
            &spurious,
            &out_of_order,
        ];
        for condition in build_conditions(&analyzers, addresses.source, addresses.destination) {
            println!(
                "condition name=\"{}\" packets={}",
                condition.name,
                condition.packets.len()
            );
        }
    }

    if let Some(path) = &args.events_json {
        let mut log = EventLog::default();
        run.replay(&mut log);
        write_json(path, &log.events)?;
    }

    if let Some(path) = &args.in_flight_json {
        let lost = DroppedPacketsAnalyzer::new(&sender, &receiver)
            .filter_packets(addresses.source, addresses.destination)
            .iter()
            .map(|p| p.key())
            .collect::<Vec<_>>();
        let mut capture = TrueBytesInFlightCapture::new(lost);
        run.replay(&mut capture);
        write_json(path, &capture.samples)?;
    }

    Ok(())
}
