//! 柱状图几何计算
//!
//! 仪表盘 SVG 柱状图的纯布局计算，前端只负责把矩形渲染成元素。

/// 一根柱子的输入数据
#[derive(Debug, Clone, PartialEq)]
pub struct ChartBar {
    pub label: String,
    pub value: f64,
}

impl ChartBar {
    pub fn new(label: impl Into<String>, value: f64) -> Self {
        Self {
            label: label.into(),
            value,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct BarRect {
    pub label: String,
    pub value: f64,
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl BarRect {
    /// 水平中心，用于放置分类标签
    pub fn center_x(&self) -> f64 {
        self.x + self.width / 2.0
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct AxisTick {
    pub value: f64,
    pub y: f64,
}

impl AxisTick {
    pub fn label(&self) -> String {
        if self.value.fract() == 0.0 {
            format!("{}", self.value as i64)
        } else {
            format!("{:.1}", self.value)
        }
    }
}

pub const PADDING_LEFT: f64 = 40.0;
pub const PADDING_RIGHT: f64 = 10.0;
pub const PADDING_TOP: f64 = 10.0;
pub const PADDING_BOTTOM: f64 = 30.0;
const TICK_COUNT: usize = 4;
/// 柱子占每个槽位的比例
const BAR_FILL: f64 = 0.6;

#[derive(Debug, Clone, PartialEq)]
pub struct ChartLayout {
    pub width: f64,
    pub height: f64,
    pub max: f64,
    pub bars: Vec<BarRect>,
    pub ticks: Vec<AxisTick>,
}

impl ChartLayout {
    pub fn compute(data: &[ChartBar], width: f64, height: f64) -> Self {
        let plot_w = (width - PADDING_LEFT - PADDING_RIGHT).max(0.0);
        let plot_h = (height - PADDING_TOP - PADDING_BOTTOM).max(0.0);
        let baseline = PADDING_TOP + plot_h;

        let data_max = data.iter().map(|b| b.value).fold(0.0_f64, f64::max);
        let max = nice_ceiling(data_max);

        let slot = if data.is_empty() {
            0.0
        } else {
            plot_w / data.len() as f64
        };
        let bar_w = slot * BAR_FILL;

        let bars = data
            .iter()
            .enumerate()
            .map(|(i, bar)| {
                let h = (bar.value.max(0.0) / max) * plot_h;
                BarRect {
                    label: bar.label.clone(),
                    value: bar.value,
                    x: PADDING_LEFT + slot * i as f64 + (slot - bar_w) / 2.0,
                    y: baseline - h,
                    width: bar_w,
                    height: h,
                }
            })
            .collect();

        let ticks = (0..=TICK_COUNT)
            .map(|i| {
                let value = max * i as f64 / TICK_COUNT as f64;
                AxisTick {
                    value,
                    y: baseline - plot_h * i as f64 / TICK_COUNT as f64,
                }
            })
            .collect();

        Self {
            width,
            height,
            max,
            bars,
            ticks,
        }
    }

    pub fn baseline(&self) -> f64 {
        self.height - PADDING_BOTTOM
    }
}

/// 形如 {1, 2, 5, 10} x 10^k 且不小于 `max` 的最小值
pub fn nice_ceiling(max: f64) -> f64 {
    if !max.is_finite() || max <= 0.0 {
        return 1.0;
    }
    let magnitude = 10f64.powf(max.log10().floor());
    let normalized = max / magnitude;
    let step = [1.0, 2.0, 5.0, 10.0]
        .into_iter()
        .find(|s| normalized <= *s + f64::EPSILON)
        .unwrap_or(10.0);
    step * magnitude
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn nice_ceiling_rounds_up() {
        assert!(approx(nice_ceiling(0.0), 1.0));
        assert!(approx(nice_ceiling(-3.0), 1.0));
        assert!(approx(nice_ceiling(1.0), 1.0));
        assert!(approx(nice_ceiling(3.0), 5.0));
        assert!(approx(nice_ceiling(20.0), 20.0));
        assert!(approx(nice_ceiling(87.0), 100.0));
        assert!(approx(nice_ceiling(120.0), 200.0));
        assert!(approx(nice_ceiling(0.3), 0.5));
    }

    #[test]
    fn bars_scale_to_plot_area() {
        let data = vec![ChartBar::new("A", 50.0), ChartBar::new("B", 100.0)];
        let layout = ChartLayout::compute(&data, 250.0, 140.0);

        // 绘图区 200 x 100，最大值 100
        assert!(approx(layout.max, 100.0));
        let b = &layout.bars[1];
        assert!(approx(b.height, 100.0));
        assert!(approx(b.y, PADDING_TOP));
        let a = &layout.bars[0];
        assert!(approx(a.height, 50.0));
        assert!(approx(a.y + a.height, layout.baseline()));
        // 槽宽 100，柱宽 60，居中
        assert!(approx(a.x, PADDING_LEFT + 20.0));
        assert!(approx(a.center_x(), PADDING_LEFT + 50.0));
    }

    #[test]
    fn ticks_span_zero_to_max() {
        let layout = ChartLayout::compute(&[ChartBar::new("A", 7.0)], 200.0, 140.0);
        let labels: Vec<String> = layout.ticks.iter().map(|t| t.label()).collect();
        assert_eq!(labels, vec!["0", "2.5", "5", "7.5", "10"]);
        assert!(approx(layout.ticks[0].y, layout.baseline()));
        assert!(approx(layout.ticks[4].y, PADDING_TOP));
    }

    #[test]
    fn empty_data_has_axis_only() {
        let layout = ChartLayout::compute(&[], 200.0, 140.0);
        assert!(layout.bars.is_empty());
        assert_eq!(layout.ticks.len(), 5);
        assert!(approx(layout.max, 1.0));
    }
}
