//! SACK / 记分板工具函数
//!
//! 纯函数：把 SACK 选项转换为有序区间，并按段粒度枚举覆盖段与空洞段。

use crate::trace::Packet;

use super::state::SackedByteRange;

/// 提取 SACK 选项，按 start 升序返回；没有 SACK 选项时返回空列表。
///
/// 右边界不大于左边界的退化块被丢弃。
pub fn parse_sack_ranges(packet: &Packet) -> Vec<SackedByteRange> {
    let Some(blocks) = packet.options.sack.as_ref() else {
        return Vec::new();
    };
    let mut ranges: Vec<SackedByteRange> = blocks
        .iter()
        .map(|&(start, end)| SackedByteRange::new(start, end))
        .filter(|r| !r.is_empty())
        .collect();
    ranges.sort_by_key(|r| r.start);
    ranges
}

/// 被某个区间完整覆盖的段起始偏移（从区间起点按段长对齐）。
pub fn segments_covered(ranges: &[SackedByteRange], segment_size: u64) -> Vec<u64> {
    if segment_size == 0 {
        return Vec::new();
    }
    let mut segments = Vec::new();
    for range in ranges {
        let mut offset = range.start;
        while offset.saturating_add(segment_size) <= range.end {
            segments.push(offset);
            offset += segment_size;
        }
    }
    segments.sort_unstable();
    segments.dedup();
    segments
}

/// 相邻两个 SACK 区间之间的空洞按段粒度推断为丢失。
///
/// 少于两个区间时没有空洞信息，返回空列表。
pub fn dropped_segments(ranges: &[SackedByteRange], segment_size: u64) -> Vec<u64> {
    if segment_size == 0 {
        return Vec::new();
    }
    ranges
        .windows(2)
        .flat_map(|pair| {
            let (lo, hi) = (pair[0].end, pair[1].start);
            (lo..hi).step_by(segment_size as usize)
        })
        .collect()
}

/// 所有区间覆盖字节数之和除以段长（整除）。
pub fn sacked_segment_count(ranges: &[SackedByteRange], segment_size: u64) -> u64 {
    if segment_size == 0 {
        return 0;
    }
    ranges.iter().map(SackedByteRange::len).sum::<u64>() / segment_size
}
