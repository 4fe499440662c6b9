//! 按窗口编号区间划分训练/验证/测试集。
//!
//! 切点用截断乘法计算: cut = (N * 比例) 取整。三个比例之和允许小于 1,
//! 编号超过合并切点的窗口被有意排除在所有分区之外。

use crate::error::WaveError;
use crate::types::{LabeledWindows, PartitionSet, TrainingConfig};
use crate::windowing::ITEM_ID_COL;
use polars::prelude::*;

/// 把带标签表切成三个分区。编号属于 (lower, upper] 区间的窗口进入对应
/// 分区, 分区内保持原始行序。
pub fn split_partitions(
    windows: &LabeledWindows,
    training: &TrainingConfig,
) -> Result<PartitionSet, WaveError> {
    training.validate()?;

    let total = windows.window_count;
    let train_cut = (total as f64 * training.train_size) as usize;
    let val_cut = (total as f64 * training.val_size) as usize;
    let test_cut = (total as f64 * training.test_size) as usize;

    let ids = windows.frame.column(ITEM_ID_COL)?.u32()?;

    let train = filter_id_range(&windows.frame, ids, 0, train_cut)?;
    let validation = filter_id_range(&windows.frame, ids, train_cut, train_cut + val_cut)?;
    let test = filter_id_range(
        &windows.frame,
        ids,
        train_cut + val_cut,
        train_cut + val_cut + test_cut,
    )?;

    Ok(PartitionSet {
        train,
        validation,
        test,
    })
}

/// 选出 lower < id <= upper 的行
fn filter_id_range(
    df: &DataFrame,
    ids: &UInt32Chunked,
    lower: usize,
    upper: usize,
) -> PolarsResult<DataFrame> {
    let mut keep = Vec::with_capacity(ids.len());
    for value in ids.into_iter() {
        let selected = value.map_or(false, |id| {
            let id = id as usize;
            id > lower && id <= upper
        });
        keep.push(selected);
    }
    let mask = BooleanChunked::from_slice("keep".into(), &keep);
    df.filter(&mask)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::windowing::item_runs;

    /// 构造 window_count 个窗口、每窗口 rows_per_window 行的带标签表
    fn make_windows(window_count: usize, rows_per_window: usize) -> LabeledWindows {
        let mut ids: Vec<u32> = Vec::new();
        let mut positions: Vec<i64> = Vec::new();
        for id in 1..=window_count as u32 {
            for row in 0..rows_per_window {
                ids.push(id);
                positions.push((id as i64 - 1) * rows_per_window as i64 + row as i64);
            }
        }
        let frame = df![
            ITEM_ID_COL => ids,
            "position" => positions,
        ]
        .unwrap();
        LabeledWindows {
            frame,
            window_count,
            window_size: rows_per_window,
        }
    }

    fn run_ids(df: &DataFrame) -> Vec<u32> {
        item_runs(df)
            .unwrap()
            .iter()
            .map(|&(id, _, _)| id)
            .collect()
    }

    #[test]
    fn test_split_without_dropped_windows() {
        // N=20, 0.7/0.15/0.15 => 切点 14/3/3, 恰好覆盖全部窗口
        let windows = make_windows(20, 3);
        let training = TrainingConfig {
            train_size: 0.7,
            val_size: 0.15,
            test_size: 0.15,
        };
        let partitions = split_partitions(&windows, &training).unwrap();

        assert_eq!(run_ids(&partitions.train), (1..=14).collect::<Vec<u32>>());
        assert_eq!(run_ids(&partitions.validation), vec![15, 16, 17]);
        assert_eq!(run_ids(&partitions.test), vec![18, 19, 20]);
        // 行级拼接完整保留每个窗口的所有行
        assert_eq!(partitions.train.height(), 14 * 3);
        assert_eq!(partitions.validation.height(), 3 * 3);
        assert_eq!(partitions.test.height(), 3 * 3);
    }

    #[test]
    fn test_windows_beyond_combined_cut_are_dropped() {
        // N=10, 0.5/0.2/0.2 => 切点 5/2/2, 编号 10 不属于任何分区
        let windows = make_windows(10, 2);
        let training = TrainingConfig {
            train_size: 0.5,
            val_size: 0.2,
            test_size: 0.2,
        };
        let partitions = split_partitions(&windows, &training).unwrap();

        assert_eq!(run_ids(&partitions.train), vec![1, 2, 3, 4, 5]);
        assert_eq!(run_ids(&partitions.validation), vec![6, 7]);
        assert_eq!(run_ids(&partitions.test), vec![8, 9]);
        let assigned = partitions.train.height()
            + partitions.validation.height()
            + partitions.test.height();
        assert_eq!(assigned, 9 * 2);
    }

    #[test]
    fn test_truncating_cut_arithmetic() {
        // N=7, 0.7/0.15/0.15 => 切点 4/1/1, 编号 7 被丢弃
        let windows = make_windows(7, 1);
        let training = TrainingConfig {
            train_size: 0.7,
            val_size: 0.15,
            test_size: 0.15,
        };
        let partitions = split_partitions(&windows, &training).unwrap();

        assert_eq!(run_ids(&partitions.train), vec![1, 2, 3, 4]);
        assert_eq!(run_ids(&partitions.validation), vec![5]);
        assert_eq!(run_ids(&partitions.test), vec![6]);
    }

    #[test]
    fn test_partition_rows_keep_original_order() {
        let windows = make_windows(4, 2);
        let training = TrainingConfig {
            train_size: 0.5,
            val_size: 0.25,
            test_size: 0.25,
        };
        let partitions = split_partitions(&windows, &training).unwrap();
        let positions: Vec<i64> = partitions
            .train
            .column("position")
            .unwrap()
            .i64()
            .unwrap()
            .into_no_null_iter()
            .collect();
        assert_eq!(positions, vec![0, 1, 2, 3]);
    }

    #[test]
    fn test_invalid_fraction_rejected() {
        let windows = make_windows(4, 1);
        let training = TrainingConfig {
            train_size: -0.1,
            val_size: 0.5,
            test_size: 0.5,
        };
        let err = split_partitions(&windows, &training).unwrap_err();
        assert!(matches!(err, WaveError::Config(_)));
    }

    #[test]
    fn test_zero_fraction_gives_empty_partition() {
        let windows = make_windows(4, 1);
        let training = TrainingConfig {
            train_size: 1.0,
            val_size: 0.0,
            test_size: 0.0,
        };
        let partitions = split_partitions(&windows, &training).unwrap();
        assert_eq!(partitions.train.height(), 4);
        assert_eq!(partitions.validation.height(), 0);
        assert_eq!(partitions.test.height(), 0);
    }
}
