use crate::metric::{FlowRun, Metric};
use crate::replay::ReplayConfig;
use crate::test::fixtures::{DST, SRC, ack, data, data_ts};
use crate::trace::{Capture, Communication, TcpFlags};

fn addresses() -> Communication {
    Communication {
        source: SRC,
        destination: DST,
    }
}

fn approx(a: Option<f64>, b: f64) -> bool {
    a.is_some_and(|a| (a - b).abs() < 1e-9)
}

/// 1447 times out once and its first retransmission is lost as well.
fn sender_with_timeouts() -> Capture {
    Capture::new(vec![
        data(1, 0.0),
        data(1447, 0.001),
        data(2893, 0.002),
        ack(1447, 0.01),
        ack(1447, 0.011),
        data_ts(1447, 0.02, 50),
        data_ts(1447, 0.7, 51),
        ack(4339, 0.75),
    ])
}

fn receiver_for_timeouts() -> Capture {
    let mut fin_ack = ack(4340, 0.8);
    fin_ack.flags = TcpFlags::FIN | TcpFlags::ACK;
    Capture::new(vec![
        data(1, 0.005),
        data(2893, 0.007),
        data_ts(1447, 0.705, 51),
        fin_ack,
    ])
}

#[test]
fn loss_metrics_compare_sender_and_receiver_counts() {
    let sender = sender_with_timeouts();
    let receiver = receiver_for_timeouts();
    let run = FlowRun::new(&sender, &receiver, addresses());

    assert_eq!(run.packets_sent_by_source(), 5);
    assert_eq!(run.packets_received_from_source(), 3);
    assert!(approx(Metric::PacketsLost.calculate(&run), 2.0));
    assert!(approx(Metric::PacketLoss.calculate(&run), 40.0));
    assert!(approx(Metric::FlowCompletionTime.calculate(&run), 0.8));
}

#[test]
fn undefined_metrics_are_none() {
    let empty = Capture::default();
    let run = FlowRun::new(&empty, &empty, addresses());
    assert_eq!(Metric::PacketLoss.calculate(&run), None);
    assert_eq!(Metric::FlowCompletionTime.calculate(&run), None);
    assert!(approx(Metric::RtoCount.calculate(&run), 0.0));
}

#[test]
fn replay_metrics_reflect_timeouts_and_recovery() {
    let sender = sender_with_timeouts();
    let receiver = receiver_for_timeouts();
    let run = FlowRun::new(&sender, &receiver, addresses());

    assert!(approx(Metric::RtoCount.calculate(&run), 1.0));
    assert!(approx(Metric::DroppedRetransmittedPackets.calculate(&run), 1.0));
    // Timeout at 0.7, last send before it at 0.02.
    assert!(approx(Metric::RtoWaitTime.calculate(&run), 0.68));
    assert!(approx(Metric::RtoWaitTimeForUnsent.calculate(&run), 0.68));
    // Recovery entered at 0.02 and force-closed by the timeout at 0.7.
    assert!(approx(Metric::RecoveryTime.calculate(&run), 0.68));

    let strict = FlowRun::new(&sender, &receiver, addresses()).with_unsent_bytes_threshold(1000);
    assert!(approx(Metric::RtoWaitTimeForUnsent.calculate(&strict), 0.0));

    let patient = FlowRun::new(&sender, &receiver, addresses()).with_config(ReplayConfig {
        rto_idle_threshold: 1.0,
        ..ReplayConfig::default()
    });
    assert!(approx(Metric::RtoCount.calculate(&patient), 0.0));
}

#[test]
fn spurious_reordering_metrics_share_the_memoized_set() {
    let p1 = data_ts(1, 0.0, 1);
    let p2 = data_ts(1447, 0.001, 2);
    let p3 = data_ts(2893, 0.002, 3);
    let p2_rtx = data_ts(1447, 0.02, 4);
    let sender = Capture::new(vec![
        p1.clone(),
        p2.clone(),
        p3.clone(),
        ack(1447, 0.01),
        ack(1447, 0.011),
        p2_rtx.clone(),
        data_ts(1447, 0.9, 5),
    ]);
    let receiver = Capture::new(vec![p1, p3, p2, p2_rtx.clone()]);
    let run = FlowRun::new(&sender, &receiver, addresses());

    assert!(std::ptr::eq(
        run.spurious_ooo_packets(),
        run.spurious_ooo_packets()
    ));
    assert!(run.spurious_ooo_packets().contains(&p2_rtx.key()));

    assert!(approx(
        Metric::SpuriousRetransmissionsFromReordering.calculate(&run),
        1.0
    ));
    assert!(approx(
        Metric::LongestSpuriousRetransmissionsBeforeRto.calculate(&run),
        1.0
    ));
}

#[test]
fn every_metric_has_a_distinct_name() {
    let mut names: Vec<_> = Metric::ALL.iter().map(|m| m.name()).collect();
    names.sort_unstable();
    names.dedup();
    assert_eq!(names.len(), Metric::ALL.len());
}
