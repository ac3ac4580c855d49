//! 语速计算

/// 计算语速（字/分钟）
///
/// 按字符数计算，对中文更接近"字/分钟"。
/// 文本为空或时长不为正数时返回 0.0，结果保留两位小数。
pub fn calculate_speaking_rate(text: &str, duration_seconds: f64) -> f64 {
    if text.is_empty() || duration_seconds.is_nan() || duration_seconds <= 0.0 {
        return 0.0;
    }

    let num_characters = text.chars().count() as f64;
    let rate_per_minute = num_characters / duration_seconds * 60.0;
    (rate_per_minute * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_speaking_rate_chinese() {
        // 19 个字符，10 秒
        let rate = calculate_speaking_rate("你好，我今天感觉非常好，这是一个测试。", 10.0);
        assert_eq!(rate, 114.0);
    }

    #[test]
    fn test_speaking_rate_rounds() {
        assert_eq!(calculate_speaking_rate("abc", 7.0), 25.71);
    }

    #[test]
    fn test_speaking_rate_degenerate_inputs() {
        assert_eq!(calculate_speaking_rate("", 10.0), 0.0);
        assert_eq!(calculate_speaking_rate("text", 0.0), 0.0);
        assert_eq!(calculate_speaking_rate("text", -3.0), 0.0);
        assert_eq!(calculate_speaking_rate("text", f64::NAN), 0.0);
    }
}
