use backoffice_shared::chart::{ChartBar, ChartLayout, PADDING_LEFT};
use leptos::prelude::*;

const WIDTH: f64 = 600.0;
const HEIGHT: f64 = 300.0;

fn px(value: f64) -> String {
    format!("{:.1}", value)
}

/// SVG 柱状图，按容器宽度缩放
#[component]
pub fn BarChart(#[prop(into)] data: Signal<Vec<ChartBar>>) -> impl IntoView {
    move || {
        let layout = data.with(|d| ChartLayout::compute(d, WIDTH, HEIGHT));
        let baseline = layout.baseline();

        let grid = layout
            .ticks
            .iter()
            .map(|tick| {
                view! {
                    <g>
                        <line
                            x1=px(PADDING_LEFT)
                            x2=px(WIDTH)
                            y1=px(tick.y)
                            y2=px(tick.y)
                            class="stroke-base-300"
                            stroke-dasharray="3 3"
                        />
                        <text
                            x=px(PADDING_LEFT - 6.0)
                            y=px(tick.y + 4.0)
                            text-anchor="end"
                            class="fill-base-content/60 text-xs"
                        >
                            {tick.label()}
                        </text>
                    </g>
                }
            })
            .collect_view();

        let bars = layout
            .bars
            .iter()
            .map(|bar| {
                view! {
                    <g>
                        <rect
                            x=px(bar.x)
                            y=px(bar.y)
                            width=px(bar.width)
                            height=px(bar.height)
                            rx="4"
                            class="fill-primary"
                        />
                        <text
                            x=px(bar.center_x())
                            y=px(baseline + 18.0)
                            text-anchor="middle"
                            class="fill-base-content/70 text-xs"
                        >
                            {bar.label.clone()}
                        </text>
                    </g>
                }
            })
            .collect_view();

        view! {
            <svg
                viewBox=format!("0 0 {} {}", WIDTH, HEIGHT)
                class="w-full h-72"
                preserveAspectRatio="xMidYMid meet"
            >
                {grid}
                {bars}
            </svg>
        }
    }
}
