//! 配图绘制服务 - 业务能力层
//!
//! 纯函数式：给定图形参数，绘制一张独立的 PNG 光栅图。
//! 几何推导（中点长度、着色格子拆分）与绘制分离，便于单独测试。

use crate::models::question::{DiagramSpec, ShapeKind};
use anyhow::{Context, Result};
use plotters::coord::cartesian::Cartesian2d;
use plotters::coord::types::RangedCoordf64;
use plotters::prelude::*;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

/// 数轴中点推导结果
///
/// R, S, T, V 四点：S 是 RT 的中点，T 是 RV 的中点
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MidpointLengths {
    pub rt: f64,
    pub rv: f64,
    pub sv: f64,
}

/// 根据 ST 段长度推导 RT / RV / SV
pub fn midpoint_lengths(segment_length: f64) -> MidpointLengths {
    let rt = 2.0 * segment_length;
    let rv = 2.0 * rt;
    MidpointLengths {
        rt,
        rv,
        sv: segment_length + rt,
    }
}

/// 把着色格子数拆成整格数量和剩余小数部分
pub fn shaded_cell_split(shaded: f64) -> (u32, f64) {
    let full = shaded.floor();
    (full as u32, shaded - full)
}

/// 配图绘制服务
///
/// 职责：
/// - 内联配图规格 -> images_dir 下的 PNG 文件
/// - 同样的参数总是产出同样的图
/// - 不处理 `Remote` 引用（交给 AssetFetcher）
pub struct DiagramRenderer {
    images_dir: PathBuf,
}

/// 绘图坐标区域别名
type DataArea<'a> =
    DrawingArea<BitMapBackend<'a>, Cartesian2d<RangedCoordf64, RangedCoordf64>>;

impl DiagramRenderer {
    /// 创建新的配图绘制服务
    pub fn new(images_dir: impl Into<PathBuf>) -> Self {
        Self {
            images_dir: images_dir.into(),
        }
    }

    /// 绘制一张配图
    ///
    /// # 参数
    /// - `name`: 文件名（不含扩展名）
    /// - `spec`: 配图规格
    ///
    /// # 返回
    /// 返回生成的 PNG 路径；`Remote` 规格返回 `None`
    pub fn render(&self, name: &str, spec: &DiagramSpec) -> Result<Option<PathBuf>> {
        if matches!(spec, DiagramSpec::Remote { .. }) {
            return Ok(None);
        }

        fs::create_dir_all(&self.images_dir)
            .with_context(|| format!("无法创建图片目录: {}", self.images_dir.display()))?;

        let path = self.images_dir.join(format!("{}.png", name));
        debug!("绘制配图: {} -> {}", name, path.display());

        match spec {
            DiagramSpec::RightTriangle { leg_a, leg_b } => {
                draw_right_triangle(&path, *leg_a, *leg_b)?
            }
            DiagramSpec::BarChart { labels, values } => draw_bar_chart(&path, labels, values)?,
            DiagramSpec::NumberLineMidpoints { segment_length } => {
                draw_number_line(&path, *segment_length)?
            }
            DiagramSpec::ShadedGrid { cols, rows, shaded } => {
                draw_shaded_grid(&path, *cols, *rows, *shaded)?
            }
            DiagramSpec::SegmentChain {
                ab,
                cd,
                ef,
                square_side,
            } => draw_segment_chain(&path, *ab, *cd, *ef, *square_side)?,
            DiagramSpec::PunchedCard => draw_punched_card(&path)?,
            DiagramSpec::ShapeIcon { shape } => draw_shape_icon(&path, *shape)?,
            DiagramSpec::Remote { .. } => unreachable!(),
        }

        Ok(Some(path))
    }
}

/// 格式化线段长度标签（整数不带小数点）
fn fmt_len(value: f64) -> String {
    if value.fract() == 0.0 {
        format!("{}", value as i64)
    } else {
        format!("{}", value)
    }
}

/// 建立数学方向（y 向上）的数据坐标区域
fn data_area<'a>(
    root: DrawingArea<BitMapBackend<'a>, plotters::coord::Shift>,
    x_range: std::ops::Range<f64>,
    y_range: std::ops::Range<f64>,
    size: (u32, u32),
) -> DataArea<'a> {
    // 像素 y 轴向下，逻辑 y 轴翻转后向上
    root.apply_coord_spec(Cartesian2d::<RangedCoordf64, RangedCoordf64>::new(
        x_range,
        y_range.end..y_range.start,
        (0..size.0 as i32, 0..size.1 as i32),
    ))
}

/// 绘制直角三角形（两条直角边 + 斜边 + 直角标记 + 边长标注）
fn draw_right_triangle(path: &Path, leg_a: f64, leg_b: f64) -> Result<()> {
    const SIZE: (u32, u32) = (600, 600);
    let root = BitMapBackend::new(path, SIZE).into_drawing_area();
    root.fill(&WHITE)?;

    let extent = leg_a.max(leg_b) + 1.0;
    let area = data_area(root, -1.5..extent, -1.5..extent, SIZE);

    let stroke = BLACK.stroke_width(2);
    area.draw(&PathElement::new(vec![(0.0, 0.0), (leg_a, 0.0)], stroke))?;
    area.draw(&PathElement::new(vec![(0.0, 0.0), (0.0, leg_b)], stroke))?;
    area.draw(&PathElement::new(vec![(leg_a, 0.0), (0.0, leg_b)], stroke))?;

    // 直角标记，边长为较短直角边的 0.15 倍
    let marker = 0.15 * leg_a.min(leg_b);
    area.draw(&Rectangle::new(
        [(0.0, 0.0), (marker, marker)],
        BLACK.stroke_width(2),
    ))?;

    let label_style = ("sans-serif", 22).into_font().color(&BLACK);
    area.draw(&Text::new(
        fmt_len(leg_a),
        (leg_a / 2.0, -0.5),
        label_style.clone(),
    ))?;
    area.draw(&Text::new(fmt_len(leg_b), (-1.0, leg_b / 2.0), label_style))?;

    area.present()?;
    Ok(())
}

/// 绘制柱状图（每个标签一根柱子，数值标在柱子上方）
fn draw_bar_chart(path: &Path, labels: &[String], values: &[f64]) -> Result<()> {
    const SIZE: (u32, u32) = (800, 600);
    // 取自原始图表的三色循环
    const COLORS: [RGBColor; 3] = [
        RGBColor(78, 121, 167),
        RGBColor(242, 142, 43),
        RGBColor(89, 161, 79),
    ];

    let root = BitMapBackend::new(path, SIZE).into_drawing_area();
    root.fill(&WHITE)?;

    let n = values.len() as f64;
    let y_max = values.iter().cloned().fold(0.0, f64::max) + 2.0;
    let area = data_area(root, -0.8..(n - 0.2), -(y_max * 0.12)..y_max, SIZE);

    let label_style = ("sans-serif", 20).into_font().color(&BLACK);

    for (i, (label, &value)) in labels.iter().zip(values.iter()).enumerate() {
        let x = i as f64;
        let color = COLORS[i % COLORS.len()];
        area.draw(&Rectangle::new(
            [(x - 0.3, 0.0), (x + 0.3, value)],
            color.filled(),
        ))?;
        // 数值标注在柱子正上方
        area.draw(&Text::new(
            fmt_len(value),
            (x - 0.05, value + y_max * 0.03),
            label_style.clone(),
        ))?;
        area.draw(&Text::new(
            label.clone(),
            (x - 0.2, -(y_max * 0.04)),
            label_style.clone(),
        ))?;
    }

    // 基线
    area.draw(&PathElement::new(
        vec![(-0.8, 0.0), (n - 0.2, 0.0)],
        BLACK.stroke_width(2),
    ))?;

    area.present()?;
    Ok(())
}

/// 绘制带中点标注的数轴（R, S, T, V）
fn draw_number_line(path: &Path, segment_length: f64) -> Result<()> {
    const SIZE: (u32, u32) = (900, 260);
    let root = BitMapBackend::new(path, SIZE).into_drawing_area();
    root.fill(&WHITE)?;

    let lengths = midpoint_lengths(segment_length);
    let area = data_area(root, -2.0..(lengths.rv + 2.0), -2.0..3.0, SIZE);

    // 主轴线
    area.draw(&PathElement::new(
        vec![(-1.0, 0.0), (lengths.rv + 1.0, 0.0)],
        BLACK.stroke_width(2),
    ))?;

    let points = [
        ("R", 0.0),
        ("S", segment_length),
        ("T", lengths.rt),
        ("V", lengths.rv),
    ];
    let label_style = ("sans-serif", 24).into_font().color(&BLACK);

    for (label, x) in points {
        area.draw(&PathElement::new(
            vec![(x, -0.4), (x, 0.4)],
            BLACK.stroke_width(2),
        ))?;
        area.draw(&Text::new(label, (x - 0.3, 1.6), label_style.clone()))?;
    }

    area.present()?;
    Ok(())
}

/// 绘制部分着色的单位网格
///
/// 先从左到右、从上到下涂满整格，剩余小数部分按比例涂最后一格
fn draw_shaded_grid(path: &Path, cols: u32, rows: u32, shaded: f64) -> Result<()> {
    let size = (cols * 80 + 40, rows * 80 + 40);
    let root = BitMapBackend::new(path, size).into_drawing_area();
    root.fill(&WHITE)?;

    let (cols_f, rows_f) = (cols as f64, rows as f64);
    // 网格第一行在画面顶端，这里不翻转 y 轴
    let area = root.apply_coord_spec(Cartesian2d::<RangedCoordf64, RangedCoordf64>::new(
        -0.25..(cols_f + 0.25),
        -0.25..(rows_f + 0.25),
        (0..size.0 as i32, 0..size.1 as i32),
    ));

    let fill = RGBColor(120, 120, 120).filled();
    let (full, fraction) = shaded_cell_split(shaded);

    for k in 0..full.min(cols * rows) {
        let (r, c) = ((k / cols) as f64, (k % cols) as f64);
        area.draw(&Rectangle::new([(c, r), (c + 1.0, r + 1.0)], fill))?;
    }
    if fraction > 0.0 && full < cols * rows {
        let (r, c) = ((full / cols) as f64, (full % cols) as f64);
        area.draw(&Rectangle::new(
            [(c, r), (c + fraction, r + 1.0)],
            fill,
        ))?;
    }

    // 网格线
    for i in 0..=cols {
        let x = i as f64;
        area.draw(&PathElement::new(
            vec![(x, 0.0), (x, rows_f)],
            BLACK.stroke_width(2),
        ))?;
    }
    for j in 0..=rows {
        let y = j as f64;
        area.draw(&PathElement::new(
            vec![(0.0, y), (cols_f, y)],
            BLACK.stroke_width(2),
        ))?;
    }

    area.present()?;
    Ok(())
}

/// 绘制三条线段夹两个正方形的组合图形
fn draw_segment_chain(path: &Path, ab: f64, cd: f64, ef: f64, square_side: f64) -> Result<()> {
    const SIZE: (u32, u32) = (900, 240);
    let root = BitMapBackend::new(path, SIZE).into_drawing_area();
    root.fill(&WHITE)?;

    let total = ab + cd + ef + 2.0 * square_side;
    let area = data_area(
        root,
        -1.0..(total + 1.0),
        -2.0..(square_side + 1.5),
        SIZE,
    );

    let stroke = BLACK.stroke_width(2);
    let label_style = ("sans-serif", 20).into_font().color(&BLACK);

    let mut x = 0.0;
    for (label, length) in [("AB", ab), ("CD", cd), ("EF", ef)] {
        area.draw(&PathElement::new(vec![(x, 0.0), (x + length, 0.0)], stroke))?;
        area.draw(&Text::new(
            format!("{} = {} cm", label, fmt_len(length)),
            (x + length / 4.0, -1.0),
            label_style.clone(),
        ))?;
        x += length;

        // 前两段后各接一个正方形
        if label != "EF" {
            area.draw(&Rectangle::new(
                [(x, 0.0), (x + square_side, square_side)],
                stroke,
            ))?;
            x += square_side;
        }
    }

    area.present()?;
    Ok(())
}

/// 绘制打孔卡片：方形轮廓加两个固定位置的实心圆孔
fn draw_punched_card(path: &Path) -> Result<()> {
    const SIZE: (u32, u32) = (400, 400);
    let root = BitMapBackend::new(path, SIZE).into_drawing_area();
    root.fill(&WHITE)?;

    let area = data_area(root, -1.0..11.0, -1.0..11.0, SIZE);

    area.draw(&Rectangle::new(
        [(0.0, 0.0), (10.0, 10.0)],
        BLACK.stroke_width(3),
    ))?;
    area.draw(&Circle::new((3.0, 6.5), 14, BLACK.filled()))?;
    area.draw(&Circle::new((6.5, 2.5), 14, BLACK.filled()))?;

    area.present()?;
    Ok(())
}

/// 绘制选项形状图标（圆 / 方 / 三角 / 五角星）
fn draw_shape_icon(path: &Path, shape: ShapeKind) -> Result<()> {
    const SIZE: (u32, u32) = (200, 200);
    let root = BitMapBackend::new(path, SIZE).into_drawing_area();
    root.fill(&WHITE)?;

    let area = data_area(root, -1.0..1.0, -1.0..1.0, SIZE);
    let stroke = BLACK.stroke_width(3);

    match shape {
        ShapeKind::Circle => {
            area.draw(&Circle::new((0.0, 0.0), 60, stroke))?;
        }
        ShapeKind::Square => {
            area.draw(&Rectangle::new([(-0.6, -0.6), (0.6, 0.6)], stroke))?;
        }
        ShapeKind::Triangle => {
            area.draw(&PathElement::new(
                vec![(-0.65, -0.5), (0.65, -0.5), (0.0, 0.62), (-0.65, -0.5)],
                stroke,
            ))?;
        }
        ShapeKind::Star => {
            let mut points = Vec::with_capacity(11);
            for i in 0..=10 {
                let radius = if i % 2 == 0 { 0.7 } else { 0.28 };
                let angle = std::f64::consts::PI * (0.5 + i as f64 / 5.0);
                points.push((radius * angle.cos(), radius * angle.sin()));
            }
            area.draw(&PathElement::new(points, stroke))?;
        }
    }

    area.present()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_midpoint_lengths_segment_12() {
        let lengths = midpoint_lengths(12.0);
        assert_eq!(lengths.rt, 24.0);
        assert_eq!(lengths.rv, 48.0);
        assert_eq!(lengths.sv, 36.0);
    }

    #[test]
    fn test_shaded_cell_split_whole() {
        assert_eq!(shaded_cell_split(4.0), (4, 0.0));
    }

    #[test]
    fn test_shaded_cell_split_fractional() {
        let (full, fraction) = shaded_cell_split(5.5);
        assert_eq!(full, 5);
        assert!((fraction - 0.5).abs() < 1e-9);
    }

    #[test]
    fn test_render_punched_card_writes_png() {
        let dir = std::env::temp_dir().join("assessment_docgen_test_images");
        let renderer = DiagramRenderer::new(&dir);

        let path = renderer
            .render("punched_card", &DiagramSpec::PunchedCard)
            .expect("render should succeed")
            .expect("inline spec should produce a file");

        let bytes = std::fs::read(&path).expect("png should exist");
        assert_eq!(&bytes[..8], b"\x89PNG\r\n\x1a\n");
    }

    #[test]
    fn test_render_shaded_grid_writes_png() {
        let dir = std::env::temp_dir().join("assessment_docgen_test_images");
        let renderer = DiagramRenderer::new(&dir);

        let spec = DiagramSpec::ShadedGrid {
            cols: 8,
            rows: 1,
            shaded: 5.5,
        };
        let path = renderer
            .render("shaded_grid", &spec)
            .expect("render should succeed")
            .expect("inline spec should produce a file");

        let bytes = std::fs::read(&path).expect("png should exist");
        assert_eq!(&bytes[..8], b"\x89PNG\r\n\x1a\n");
    }

    #[test]
    fn test_render_remote_is_skipped() {
        let dir = std::env::temp_dir().join("assessment_docgen_test_images");
        let renderer = DiagramRenderer::new(&dir);

        let spec = DiagramSpec::Remote {
            url: "https://example.com/figure.png".to_string(),
        };
        assert!(renderer.render("remote", &spec).unwrap().is_none());
    }
}
