//! 浮标有效波高(SWH)预报数据管线。
//!
//! 核心是滑动窗口构建与数据集划分: 原始测量表 → 窗口扫描(缺失值过滤) →
//! 带编号的窗口集合 → 按编号区间切分训练/验证/测试集。模型训练、预测与
//! 排行榜计算通过 [`engine::ForecastEngine`] 交给外部预报后端。

pub mod dataset;
pub mod engine;
pub mod error;
pub mod pipeline;
pub mod types;
pub mod windowing;
