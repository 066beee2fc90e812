use crate::analyze::{
    DroppedPacketsAnalyzer, FastRetransmitSackAnalyzer, PacketAnalyzer, PacketOutOfOrderAnalyzer,
    SingleDupAckRetransmitSackAnalyzer, SpuriousReorderRetransmissionAnalyzer,
    SpuriousRetransmissionAnalyzer, build_conditions,
};
use crate::test::fixtures::{DST, SRC, ack, data, data_ts, sack};
use crate::trace::{Capture, Packet, TcpFlags};

fn seqs(packets: &[Packet]) -> Vec<u64> {
    packets.iter().map(|p| p.seq).collect()
}

#[test]
fn identical_copies_are_not_dropped() {
    let sender = Capture::new(vec![data_ts(1, 0.0, 5), data_ts(1447, 0.001, 6)]);
    let receiver = Capture::new(vec![data_ts(1, 0.01, 5), data_ts(1447, 0.011, 6)]);
    let dropped = DroppedPacketsAnalyzer::new(&sender, &receiver).filter_packets(SRC, DST);
    assert!(dropped.is_empty());

    let mut altered = data_ts(1447, 0.011, 6);
    altered.ack = 99;
    let receiver = Capture::new(vec![data_ts(1, 0.01, 5), altered]);
    let dropped = DroppedPacketsAnalyzer::new(&sender, &receiver).filter_packets(SRC, DST);
    assert_eq!(seqs(&dropped), vec![1447]);
}

#[test]
fn retransmitted_copy_is_distinguished_by_timestamp() {
    let sender = Capture::new(vec![
        data_ts(1, 0.0, 1),
        data_ts(1447, 0.001, 2),
        data_ts(1447, 0.5, 3),
        ack(2893, 0.6),
    ]);
    let receiver = Capture::new(vec![data_ts(1, 0.01, 1), data_ts(1447, 0.51, 3)]);
    let dropped = DroppedPacketsAnalyzer::new(&sender, &receiver).filter_packets(SRC, DST);
    assert_eq!(dropped.len(), 1);
    assert_eq!(dropped[0].time, 0.001);
}

#[test]
fn out_of_order_delivery_is_detected_positionally() {
    let sent = [
        data(1, 0.0),
        data(1447, 0.001),
        data(2893, 0.002),
        data(4339, 0.003),
    ];
    let sender = Capture::new(sent.to_vec());
    let receiver = Capture::new(vec![
        sent[0].clone(),
        sent[2].clone(),
        sent[1].clone(),
        sent[3].clone(),
    ]);
    let ooo = PacketOutOfOrderAnalyzer::new(&sender, &receiver).filter_packets(SRC, DST);
    assert_eq!(seqs(&ooo), vec![1447, 2893]);

    let in_order = Capture::new(sent.to_vec());
    assert!(
        PacketOutOfOrderAnalyzer::new(&sender, &in_order)
            .filter_packets(SRC, DST)
            .is_empty()
    );
}

#[test]
fn lost_packets_do_not_count_as_reordering() {
    let sent = [data(1, 0.0), data(1447, 0.001), data(2893, 0.002)];
    let sender = Capture::new(sent.to_vec());
    let receiver = Capture::new(vec![sent[0].clone(), sent[2].clone()]);
    assert!(
        PacketOutOfOrderAnalyzer::new(&sender, &receiver)
            .filter_packets(SRC, DST)
            .is_empty()
    );
}

#[test]
fn delivered_duplicate_seq_is_spurious_from_second_copy() {
    let original = data_ts(1447, 0.001, 2);
    let rtx = data_ts(1447, 0.05, 9);
    let sender = Capture::new(vec![data_ts(1, 0.0, 1), original.clone(), rtx.clone()]);

    let receiver = Capture::new(vec![data_ts(1, 0.0, 1), original.clone(), rtx.clone()]);
    let spurious = SpuriousRetransmissionAnalyzer::new(&sender, &receiver).filter_packets(SRC, DST);
    assert_eq!(spurious, vec![rtx.clone()]);

    // Original lost: the retransmission was needed.
    let receiver = Capture::new(vec![data_ts(1, 0.0, 1), rtx]);
    assert!(
        SpuriousRetransmissionAnalyzer::new(&sender, &receiver)
            .filter_packets(SRC, DST)
            .is_empty()
    );
}

#[test]
fn reordering_spurious_retransmission_excuses_the_original() {
    let p1 = data_ts(1, 0.0, 1);
    let p2 = data_ts(1447, 0.001, 2);
    let p3 = data_ts(2893, 0.002, 3);
    let p2_rtx = data_ts(1447, 0.02, 4);
    let p4 = data_ts(4339, 0.021, 5);
    let p4_rtx = data_ts(4339, 0.03, 6);

    let sender = Capture::new(vec![
        p1.clone(),
        p2.clone(),
        p3.clone(),
        p2_rtx.clone(),
        p4.clone(),
        p4_rtx.clone(),
    ]);
    // p2 overtaken by p3; p4 duplicated without any reordering.
    let receiver = Capture::new(vec![p1, p3, p2, p2_rtx.clone(), p4, p4_rtx]);

    let spurious =
        SpuriousReorderRetransmissionAnalyzer::new(&sender, &receiver).filter_packets(SRC, DST);
    assert_eq!(spurious, vec![p2_rtx]);
}

#[test]
fn conditions_label_each_packet_once() {
    let original = data_ts(1447, 0.001, 2);
    let rtx = data_ts(1447, 0.05, 9);
    let lost = data_ts(2893, 0.002, 3);
    let sender = Capture::new(vec![data_ts(1, 0.0, 1), original.clone(), lost, rtx.clone()]);
    let receiver = Capture::new(vec![data_ts(1, 0.0, 1), original, rtx]);

    let dropped = DroppedPacketsAnalyzer::new(&sender, &receiver);
    let spurious = SpuriousRetransmissionAnalyzer::new(&sender, &receiver);
    let analyzers: [&dyn PacketAnalyzer; 3] = [&dropped, &spurious, &spurious];
    let conditions = build_conditions(&analyzers, SRC, DST);

    assert_eq!(conditions.len(), 3);
    assert_eq!(conditions[0].name, "Dropped Packets");
    assert_eq!(seqs(&conditions[0].packets), vec![2893]);
    assert_eq!(seqs(&conditions[1].packets), vec![1447]);
    assert!(conditions[2].packets.is_empty());
}

/// Five segments, 1447 lost, then SACK evidence above it.
fn sack_sender_trace(blocks: &[(u64, u64)], dup_acks: usize) -> Vec<Packet> {
    let mut pkts = Vec::new();
    for (i, seq) in [1, 1447, 2893, 4339, 5785].into_iter().enumerate() {
        pkts.push(data(seq, i as f64 * 0.001));
    }
    pkts.push(ack(1447, 0.01));
    for i in 0..dup_acks {
        pkts.push(sack(1447, blocks, 0.02 + i as f64 * 0.001));
    }
    pkts
}

#[test]
fn sack_fast_retransmit_analyzer_reports_gap_retransmissions() {
    let mut pkts = sack_sender_trace(&[(2893, 4339), (5785, 7231)], 3);
    pkts.push(data_ts(4339, 0.03, 77));
    let sender = Capture::new(pkts);

    let found = FastRetransmitSackAnalyzer::new(&sender).filter_packets(SRC, DST);
    assert_eq!(found.len(), 1);
    assert_eq!(found[0].seq, 4339);
    assert_eq!(found[0].time, 0.03);
}

#[test]
fn single_dup_ack_analyzer_keeps_only_spurious_retransmissions() {
    let mut pkts = sack_sender_trace(&[(2893, 7231)], 1);
    let rtx = data_ts(1447, 0.03, 77);
    pkts.push(rtx.clone());
    let sender = Capture::new(pkts.clone());

    // The original 1447 was only delayed, so both copies reached the receiver.
    let receiver = Capture::new(vec![
        pkts[0].clone(),
        pkts[2].clone(),
        pkts[3].clone(),
        pkts[4].clone(),
        pkts[1].clone(),
        rtx.clone(),
    ]);
    let found = SingleDupAckRetransmitSackAnalyzer::new(&sender, &receiver).filter_packets(SRC, DST);
    assert_eq!(found, vec![rtx.clone()]);

    // Genuinely lost original: the retransmission was not spurious.
    let receiver = Capture::new(vec![
        pkts[0].clone(),
        pkts[2].clone(),
        pkts[3].clone(),
        pkts[4].clone(),
        rtx,
    ]);
    assert!(
        SingleDupAckRetransmitSackAnalyzer::new(&sender, &receiver)
            .filter_packets(SRC, DST)
            .is_empty()
    );
}

/// Handshake ACK from the sender shares seq 1 with the first data segment.
fn handshake_ack() -> Packet {
    let mut pkt = data_ts(1, 0.0, 1);
    pkt.payload = false;
    pkt.flags = TcpFlags::ACK;
    pkt
}

#[test]
fn handshake_ack_is_not_mistaken_for_the_first_segment() {
    let sent = [
        handshake_ack(),
        data_ts(1, 0.001, 2),
        data_ts(1447, 0.002, 3),
    ];
    let sender = Capture::new(sent.to_vec());
    let receiver = Capture::new(sent.to_vec());

    assert!(
        SpuriousRetransmissionAnalyzer::new(&sender, &receiver)
            .filter_packets(SRC, DST)
            .is_empty()
    );
    assert!(
        PacketOutOfOrderAnalyzer::new(&sender, &receiver)
            .filter_packets(SRC, DST)
            .is_empty()
    );
    assert!(
        SpuriousReorderRetransmissionAnalyzer::new(&sender, &receiver)
            .filter_packets(SRC, DST)
            .is_empty()
    );
}

#[test]
fn reordering_is_paired_over_data_segments_only() {
    let p1 = data_ts(1, 0.001, 2);
    let p2 = data_ts(1447, 0.002, 3);
    let sender = Capture::new(vec![handshake_ack(), p1.clone(), p2.clone()]);
    // The receiver saw the handshake ACK late, after the data.
    let receiver = Capture::new(vec![p1, p2, handshake_ack()]);
    assert!(
        PacketOutOfOrderAnalyzer::new(&sender, &receiver)
            .filter_packets(SRC, DST)
            .is_empty()
    );
}
