use crate::error::DataError;
use polars::prelude::DataFrame;

/// 窗口尺寸参数: 上下文长度 + 预测步长 = 窗口总长。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WindowParams {
    pub context_length: usize,
    pub prediction_length: usize,
}

impl WindowParams {
    pub fn new(context_length: usize, prediction_length: usize) -> Self {
        Self {
            context_length,
            prediction_length,
        }
    }

    /// 窗口总行数
    pub fn window_size(&self) -> usize {
        self.context_length + self.prediction_length
    }

    pub fn validate(&self) -> Result<(), DataError> {
        if self.context_length == 0 {
            return Err(DataError::InvalidParameter {
                param_name: "context_length".to_string(),
                value: self.context_length.to_string(),
                reason: "上下文长度必须 >= 1".to_string(),
            });
        }
        if self.prediction_length == 0 {
            return Err(DataError::InvalidParameter {
                param_name: "prediction_length".to_string(),
                value: self.prediction_length.to_string(),
                reason: "预测步长必须 >= 1".to_string(),
            });
        }
        Ok(())
    }
}

/// 一个通过过滤的窗口: 编号从 1 起连续递增, start 为窗口首行在原表中的偏移。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WindowSpec {
    pub id: u32,
    pub start: usize,
}

/// 扫描产物: 所有接受窗口按编号升序垂直拼接成的带标签表。
/// 每行带有所属窗口的 item_id, 每个窗口恰好 window_size 行。
#[derive(Debug, Clone)]
pub struct LabeledWindows {
    pub frame: DataFrame,
    pub window_count: usize,
    pub window_size: usize,
}

/// 按窗口编号区间切分出的三个分区表。
#[derive(Debug, Clone)]
pub struct PartitionSet {
    pub train: DataFrame,
    pub validation: DataFrame,
    pub test: DataFrame,
}
