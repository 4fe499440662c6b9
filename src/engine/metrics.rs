//! 参考后端使用的预报精度指标。
//!
//! 所有函数假设 actual 与 predicted 等长且非空, 由调用方切片保证。

/// 平均绝对误差
pub fn mae(actual: &[f64], predicted: &[f64]) -> f64 {
    let n = actual.len() as f64;
    actual
        .iter()
        .zip(predicted.iter())
        .map(|(a, p)| (a - p).abs())
        .sum::<f64>()
        / n
}

/// 均方根误差
pub fn rmse(actual: &[f64], predicted: &[f64]) -> f64 {
    let n = actual.len() as f64;
    let mse = actual
        .iter()
        .zip(predicted.iter())
        .map(|(a, p)| (a - p).powi(2))
        .sum::<f64>()
        / n;
    mse.sqrt()
}

/// 对数均方根误差。负值先截断到 0, 避免对数无定义。
pub fn rmsle(actual: &[f64], predicted: &[f64]) -> f64 {
    let n = actual.len() as f64;
    let msle = actual
        .iter()
        .zip(predicted.iter())
        .map(|(a, p)| {
            let la = (a.max(0.0) + 1.0).ln();
            let lp = (p.max(0.0) + 1.0).ln();
            (la - lp).powi(2)
        })
        .sum::<f64>()
        / n;
    msle.sqrt()
}

/// 对称平均绝对百分比误差。分母为 0 的点记 0。
pub fn smape(actual: &[f64], predicted: &[f64]) -> f64 {
    let n = actual.len() as f64;
    actual
        .iter()
        .zip(predicted.iter())
        .map(|(a, p)| {
            let denom = a.abs() + p.abs();
            if denom == 0.0 {
                0.0
            } else {
                2.0 * (a - p).abs() / denom
            }
        })
        .sum::<f64>()
        * 100.0
        / n
}

/// 平均绝对比例误差, 以历史观测的一阶朴素预报 MAE 为尺度。
/// 历史不足两点或尺度为 0 时无定义, 返回 None。
pub fn mase(actual: &[f64], predicted: &[f64], history: &[f64]) -> Option<f64> {
    if history.len() < 2 {
        return None;
    }
    let scale = history
        .windows(2)
        .map(|pair| (pair[1] - pair[0]).abs())
        .sum::<f64>()
        / (history.len() - 1) as f64;
    if scale == 0.0 {
        return None;
    }
    Some(mae(actual, predicted) / scale)
}
