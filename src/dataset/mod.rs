//! 测量表的读写工具。
//!
//! 输入 CSV 每行一个时间步, 行序即时间序, 读入后不做任何重排。

use crate::error::WaveError;
use polars::prelude::*;
use std::fs::File;
use std::path::Path;

/// 读取一个站点的测量表。空单元格读入为 null, 由窗口扫描统一按缺失处理。
pub fn read_measurement_csv(path: &Path) -> Result<DataFrame, WaveError> {
    let df = CsvReadOptions::default()
        .with_has_header(true)
        .try_into_reader_with_file_path(Some(path.to_path_buf()))?
        .finish()?;
    Ok(df)
}

/// 将结果表写为带表头的 CSV。
pub fn write_csv(df: &mut DataFrame, path: &Path) -> Result<(), WaveError> {
    let mut file = File::create(path)?;
    CsvWriter::new(&mut file).include_header(true).finish(df)?;
    Ok(())
}

/// 垂直拼接一组表。空集合返回 None, 由调用方给出显式错误,
/// 避免静默产出空表。
pub fn vstack_all(frames: Vec<DataFrame>) -> PolarsResult<Option<DataFrame>> {
    let mut iter = frames.into_iter();
    let mut acc = match iter.next() {
        Some(frame) => frame,
        None => return Ok(None),
    };
    for frame in iter {
        acc.vstack_mut(&frame)?;
    }
    Ok(Some(acc))
}
