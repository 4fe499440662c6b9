//! 滑动窗口构建与数据集划分。

pub mod partition;
pub mod scanner;

pub use partition::split_partitions;
pub use scanner::scan_windows;

use polars::prelude::*;

/// 窗口编号列名, 下游分区与预报后端都以它作为分组键
pub const ITEM_ID_COL: &str = "item_id";

/// 扫描 item_id 列的连续段, 返回每段的 (编号, 起始行, 行数)。
/// 带标签表中同一窗口的行总是连续的, 编号升序。
pub fn item_runs(df: &DataFrame) -> PolarsResult<Vec<(u32, usize, usize)>> {
    let ids = df.column(ITEM_ID_COL)?.u32()?;

    let mut runs: Vec<(u32, usize, usize)> = Vec::new();
    let mut current: Option<(u32, usize, usize)> = None;
    for (row, value) in ids.into_iter().enumerate() {
        let id = value
            .ok_or_else(|| PolarsError::ComputeError("item_id 列不允许为 null".into()))?;
        current = match current {
            Some((cur, start, len)) if cur == id => Some((cur, start, len + 1)),
            Some(finished) => {
                runs.push(finished);
                Some((id, row, 1))
            }
            None => Some((id, row, 1)),
        };
    }
    if let Some(last) = current {
        runs.push(last);
    }
    Ok(runs)
}
