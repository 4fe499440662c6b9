//! 滑动窗口扫描。
//!
//! 从偏移 0 开始逐一考察候选窗口: 整窗缺失率超标或预测区间有缺失的窗口
//! 被拒绝并后移一行重试; 通过的窗口获得下一个连续编号, 扫描位置前跳一个
//! 预测步长。拒绝退一行、接受跳一步的不对称步进是既定行为: 坏窗口之后
//! 就近寻找干净对齐, 同时保证被接受的窗口互不重叠, 下游划分依赖这一
//! 编号布局, 不得改为均匀步进。

use crate::dataset::vstack_all;
use crate::error::{DataError, WaveError};
use crate::types::{LabeledWindows, WindowParams, WindowSpec};
use crate::windowing::ITEM_ID_COL;
use polars::prelude::*;

/// 整窗缺失率上限, 超过即拒绝
const MAX_MISSING_FRACTION: f64 = 0.05;

/// 构建目标列的缺失掩码。CSV 空单元格读入为 null, NaN 同样按缺失处理,
/// 与上游对缺失值的判定保持一致。
fn missing_mask(df: &DataFrame, target: &str) -> Result<Vec<bool>, DataError> {
    let column = df.column(target).map_err(|_| DataError::MissingColumn {
        column: target.to_string(),
        context: "窗口扫描".to_string(),
    })?;
    let values = column.f64().map_err(|_| DataError::InvalidColumnType {
        column: target.to_string(),
        context: "窗口扫描".to_string(),
    })?;
    Ok(values.iter().map(|v| v.map_or(true, f64::is_nan)).collect())
}

/// 扫描测量表, 返回所有接受窗口拼接成的带标签表。
///
/// 行序即时间序, 扫描过程不重排任何行; 同一输入两次扫描产出完全相同。
/// 没有任何窗口通过过滤时返回显式错误, 而不是空表。
pub fn scan_windows(
    df: &DataFrame,
    target: &str,
    params: &WindowParams,
) -> Result<LabeledWindows, WaveError> {
    params.validate()?;
    let window_size = params.window_size();
    let total_rows = df.height();
    if total_rows < window_size {
        return Err(DataError::NotEnoughRows {
            rows: total_rows,
            window_size,
        }
        .into());
    }

    let missing = missing_mask(df, target)?;

    // 缺失行数前缀和: prefix[i] = 前 i 行中缺失的行数
    let mut prefix = vec![0usize; total_rows + 1];
    for (i, &is_missing) in missing.iter().enumerate() {
        prefix[i + 1] = prefix[i] + usize::from(is_missing);
    }

    let mut specs: Vec<WindowSpec> = Vec::new();
    let mut scanned = 0usize;
    let mut next_id: u32 = 1;
    let mut offset = 0usize;
    while offset + window_size <= total_rows {
        scanned += 1;
        let end = offset + window_size;

        // 1. 整窗缺失率检查
        let lost_rows = prefix[end] - prefix[offset];
        let lost = lost_rows as f64 / window_size as f64;
        if lost > MAX_MISSING_FRACTION {
            offset += 1;
            continue;
        }

        // 2. 预测区间 (窗口末尾 prediction_length 行) 不允许任何缺失
        let horizon_start = end - params.prediction_length;
        if missing[horizon_start..end].iter().any(|&m| m) {
            offset += 1;
            continue;
        }

        // 3. 接受: 分配下一个连续编号, 前跳一个预测步长
        specs.push(WindowSpec {
            id: next_id,
            start: offset,
        });
        next_id += 1;
        offset += params.prediction_length;
    }

    let mut frames = Vec::with_capacity(specs.len());
    for spec in &specs {
        let mut window = df.slice(spec.start as i64, window_size);
        let ids = Series::new(ITEM_ID_COL.into(), vec![spec.id; window_size]);
        window.with_column(ids)?;
        frames.push(window);
    }

    let frame = vstack_all(frames)?.ok_or(DataError::EmptyWindowCollection { scanned })?;

    Ok(LabeledWindows {
        frame,
        window_count: specs.len(),
        window_size,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::DataError;
    use crate::windowing::item_runs;

    /// 构造 timestamp + SWH 两列的测量表
    fn make_table(values: Vec<Option<f64>>) -> DataFrame {
        let timestamps: Vec<i64> = (0..values.len() as i64).collect();
        df![
            "timestamp" => timestamps,
            "SWH" => values,
        ]
        .unwrap()
    }

    fn clean_table(rows: usize) -> DataFrame {
        make_table((0..rows).map(|i| Some(i as f64 * 0.1)).collect())
    }

    /// 读取带标签表中某行的原始 timestamp
    fn timestamp_at(frame: &DataFrame, row: usize) -> i64 {
        frame
            .column("timestamp")
            .unwrap()
            .i64()
            .unwrap()
            .get(row)
            .unwrap()
    }

    #[test]
    fn test_clean_table_non_overlapping_stride() {
        // 100 行无缺失, 上下文 10 + 步长 5: 窗口起点 0, 5, ..., 85, 共 18 个
        let table = clean_table(100);
        let params = WindowParams::new(10, 5);
        let windows = scan_windows(&table, "SWH", &params).unwrap();

        assert_eq!(windows.window_count, 18);
        assert_eq!(windows.window_size, 15);
        assert_eq!(windows.frame.height(), 18 * 15);

        let runs = item_runs(&windows.frame).unwrap();
        let ids: Vec<u32> = runs.iter().map(|&(id, _, _)| id).collect();
        assert_eq!(ids, (1..=18).collect::<Vec<u32>>());
        // 每个窗口恰好 window_size 行
        assert!(runs.iter().all(|&(_, _, len)| len == 15));
        // 第 k 个窗口的首行来自原表偏移 5k
        for (k, &(_, start, _)) in runs.iter().enumerate() {
            assert_eq!(timestamp_at(&windows.frame, start), 5 * k as i64);
        }
    }

    #[test]
    fn test_missing_horizon_retries_until_clean() {
        // 原表第 12-14 行缺失: 偏移 0-14 的窗口都覆盖缺失行
        // (缺失率超标或预测区间有缺失), 逐行重试直到偏移 15 才干净
        let mut values: Vec<Option<f64>> = (0..100).map(|i| Some(i as f64)).collect();
        for row in 12..=14 {
            values[row] = None;
        }
        let table = make_table(values);
        let params = WindowParams::new(10, 5);
        let windows = scan_windows(&table, "SWH", &params).unwrap();

        let runs = item_runs(&windows.frame).unwrap();
        // 第一个接受窗口从原表偏移 15 开始, 之后恢复步长 5
        assert_eq!(timestamp_at(&windows.frame, 0), 15);
        assert_eq!(windows.window_count, 15);
        let ids: Vec<u32> = runs.iter().map(|&(id, _, _)| id).collect();
        assert_eq!(ids, (1..=15).collect::<Vec<u32>>());
    }

    #[test]
    fn test_lost_fraction_rejects_window() {
        // 窗口长 15, 上下文区有 1 个缺失 => 缺失率 1/15 > 0.05, 整窗拒绝
        let mut values: Vec<Option<f64>> = (0..20).map(|i| Some(i as f64)).collect();
        values[2] = None;
        let table = make_table(values);
        let params = WindowParams::new(10, 5);
        let windows = scan_windows(&table, "SWH", &params).unwrap();

        // 偏移 0-2 的窗口都包含缺失行, 偏移 3 是第一个干净窗口;
        // 接受后前跳到偏移 8, 已放不下第二个窗口
        assert_eq!(windows.window_count, 1);
        assert_eq!(timestamp_at(&windows.frame, 0), 3);
    }

    #[test]
    fn test_all_missing_fails_explicitly() {
        let table = make_table(vec![None; 30]);
        let params = WindowParams::new(10, 5);
        let err = scan_windows(&table, "SWH", &params).unwrap_err();
        match err {
            WaveError::Data(DataError::EmptyWindowCollection { scanned }) => {
                assert_eq!(scanned, 16)
            }
            other => panic!("Expected EmptyWindowCollection, got {other:?}"),
        }
    }

    #[test]
    fn test_table_shorter_than_window() {
        let table = clean_table(10);
        let params = WindowParams::new(10, 5);
        let err = scan_windows(&table, "SWH", &params).unwrap_err();
        assert!(matches!(
            err,
            WaveError::Data(DataError::NotEnoughRows {
                rows: 10,
                window_size: 15
            })
        ));
    }

    #[test]
    fn test_missing_target_column() {
        let table = df!["timestamp" => [0i64, 1, 2]].unwrap();
        let params = WindowParams::new(1, 1);
        let err = scan_windows(&table, "SWH", &params).unwrap_err();
        assert!(matches!(
            err,
            WaveError::Data(DataError::MissingColumn { .. })
        ));
    }

    #[test]
    fn test_nan_counts_as_missing() {
        // NaN 与 null 同样视为缺失
        let mut values: Vec<Option<f64>> = (0..30).map(|i| Some(i as f64)).collect();
        values[28] = Some(f64::NAN);
        let table = make_table(values);
        let params = WindowParams::new(10, 5);
        let windows = scan_windows(&table, "SWH", &params).unwrap();
        // 偏移 0, 5, 10 的窗口被接受; 偏移 15 的窗口覆盖第 28 行的 NaN,
        // 缺失率 1/15 超标被拒绝, 此后再无放得下的窗口
        assert_eq!(windows.window_count, 3);
        let runs = item_runs(&windows.frame).unwrap();
        let (_, last_start, _) = runs[runs.len() - 1];
        assert_eq!(timestamp_at(&windows.frame, last_start), 10);
    }

    #[test]
    fn test_rescan_is_deterministic() {
        let mut values: Vec<Option<f64>> = (0..100).map(|i| Some(i as f64)).collect();
        values[40] = None;
        let table = make_table(values);
        let params = WindowParams::new(10, 5);

        let first = scan_windows(&table, "SWH", &params).unwrap();
        let second = scan_windows(&table, "SWH", &params).unwrap();
        assert_eq!(first.window_count, second.window_count);
        assert!(first.frame.equals_missing(&second.frame));
    }

    #[test]
    fn test_zero_context_length_rejected() {
        let table = clean_table(20);
        let params = WindowParams::new(0, 5);
        let err = scan_windows(&table, "SWH", &params).unwrap_err();
        assert!(matches!(
            err,
            WaveError::Data(DataError::InvalidParameter { .. })
        ));
    }
}
