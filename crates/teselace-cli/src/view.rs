//! Console presentation of a covering.
//!
//! Both spaces are laid out as titled sections of indented rows of cells. The
//! text view prints block numbers only; the visual view additionally paints each
//! cell with its block's color.

use std::io::{self, Write};

use crossterm::{
    queue,
    style::{Color as TermColor, Print, ResetColor, SetBackgroundColor, SetForegroundColor},
};
use teselace_core::{CellState, PyramidPosition, PyramidTopology, RectPosition, RectTopology, Topology};
use teselace_coverer::CoveringModel;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Align {
    Center,
    Left,
}

#[derive(Debug)]
pub struct Row<P> {
    pub indent: usize,
    pub cells: Vec<P>,
}

#[derive(Debug)]
pub struct Section<P> {
    pub title: Option<String>,
    pub rows: Vec<Row<P>>,
}

#[derive(Debug)]
pub struct Layout<P> {
    pub cell_width: usize,
    pub align: Align,
    pub sections: Vec<Section<P>>,
}

/// A topology that knows how to arrange its positions on the console.
pub trait ConsoleView: Topology {
    fn layout(model: &CoveringModel<Self>) -> Layout<Self::Position>;
}

impl ConsoleView for RectTopology {
    fn layout(model: &CoveringModel<Self>) -> Layout<RectPosition> {
        let topology = model.topology();
        let rows = (0..topology.height())
            .map(|y| Row {
                indent: 0,
                cells: (0..topology.width()).map(|x| RectPosition::new(x, y)).collect(),
            })
            .collect();

        Layout {
            cell_width: label_len(model) + 1,
            align: Align::Center,
            sections: vec![Section { title: None, rows }],
        }
    }
}

impl ConsoleView for PyramidTopology {
    fn layout(model: &CoveringModel<Self>) -> Layout<PyramidPosition> {
        let topology = *model.topology();
        let len = label_len(model);
        // even widths keep the half-cell row offset aligned
        let cell_width = if len % 2 == 1 { len + 1 } else { len + 2 };

        let sections = (0..topology.size())
            .map(|z| {
                let layer = topology.layer_size(z);
                let rows = (0..layer)
                    .map(|y| Row {
                        indent: y * (cell_width / 2),
                        cells: (0..layer - y)
                            .map(|x| PyramidPosition::new(x, y, z))
                            .collect(),
                    })
                    .collect();
                Section {
                    title: Some(format!("Layer {}", z + 1)),
                    rows,
                }
            })
            .collect();

        Layout {
            cell_width,
            align: Align::Left,
            sections,
        }
    }
}

fn label_len<T: Topology>(model: &CoveringModel<T>) -> usize {
    model.blocks().len().max(1).to_string().len()
}

fn label<T: Topology>(model: &CoveringModel<T>, pos: T::Position) -> String {
    match model.cell(pos) {
        CellState::Block(number) => number.to_string(),
        CellState::Placeholder => "+".to_owned(),
        CellState::Empty => ".".to_owned(),
    }
}

fn pad(text: &str, width: usize, align: Align) -> String {
    match align {
        Align::Center => format!("{text:^width$}"),
        Align::Left => format!("{text:<width$}"),
    }
}

fn write_section_title<W: Write>(out: &mut W, title: Option<&str>) -> io::Result<()> {
    if let Some(title) = title {
        writeln!(out)?;
        writeln!(out, "{title}")?;
        writeln!(out)?;
    }
    Ok(())
}

/// Prints block numbers, one console row per row of the layout.
pub fn write_text<T: ConsoleView, W: Write>(model: &CoveringModel<T>, out: &mut W) -> io::Result<()> {
    let layout = T::layout(model);
    for section in &layout.sections {
        write_section_title(out, section.title.as_deref())?;
        for row in &section.rows {
            let mut line = " ".repeat(row.indent);
            for &pos in &row.cells {
                line.push_str(&pad(&label(model, pos), layout.cell_width, layout.align));
            }
            writeln!(out, "{line}")?;
        }
    }
    Ok(())
}

/// Prints the layout with each cell painted in its block's color.
///
/// Hidden blocks and uncovered positions are left blank.
pub fn write_visual<T: ConsoleView, W: Write>(model: &CoveringModel<T>, out: &mut W) -> io::Result<()> {
    let layout = T::layout(model);
    for section in &layout.sections {
        write_section_title(out, section.title.as_deref())?;
        for row in &section.rows {
            queue!(out, Print(" ".repeat(row.indent)))?;
            for &pos in &row.cells {
                match model.block_at(pos).filter(|block| block.is_visible()) {
                    Some(block) => {
                        let color = block.color();
                        let text = if color.is_light() {
                            TermColor::Black
                        } else {
                            TermColor::White
                        };
                        queue!(
                            out,
                            SetBackgroundColor(TermColor::Rgb {
                                r: color.r,
                                g: color.g,
                                b: color.b,
                            }),
                            SetForegroundColor(text),
                            Print(pad(&block.number().to_string(), layout.cell_width, layout.align)),
                            ResetColor,
                        )?;
                    }
                    None => queue!(out, Print(" ".repeat(layout.cell_width)))?,
                }
            }
            queue!(out, Print("\n"))?;
        }
    }
    out.flush()
}

#[cfg(test)]
mod tests {
    use teselace_coverer::{BlockSizes, CoveringConfig, CoveringSeed};

    use super::*;

    fn covered<T: Topology>(topology: T, size: usize) -> CoveringModel<T> {
        let mut model = CoveringModel::with_seed(
            topology,
            CoveringConfig::new(BlockSizes::fixed(size).unwrap()),
            CoveringSeed::from_phrase("view"),
        )
        .unwrap();
        model.try_cover().unwrap();
        model
    }

    fn text<T: ConsoleView>(model: &CoveringModel<T>) -> String {
        let mut out = Vec::new();
        write_text(model, &mut out).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn test_rect_text() {
        let model = covered(RectTopology::new(3, 1).unwrap(), 3);
        assert_eq!(text(&model), "1 1 1 \n");
    }

    #[test]
    fn test_rect_text_centers_wide_numbers() {
        // 12 blocks of one position each
        let model = covered(RectTopology::new(4, 3).unwrap(), 1);
        let text = text(&model);
        let lines = text.lines().collect::<Vec<_>>();
        assert_eq!(lines.len(), 3);
        assert_eq!(lines[0], " 1  2  3  4 ");
        assert_eq!(lines[2], " 9 10 11 12 ");
    }

    #[test]
    fn test_pyramid_text() {
        let model = covered(PyramidTopology::new(2).unwrap(), 4);
        assert_eq!(text(&model), "\nLayer 1\n\n1 1 \n 1 \n\nLayer 2\n\n1 \n");
    }

    #[test]
    fn test_empty_positions_are_dotted() {
        let model = CoveringModel::new(RectTopology::new(2, 1).unwrap(), CoveringConfig::default())
            .unwrap();
        assert_eq!(text(&model), ". . \n");
    }

    #[test]
    fn test_visual_paints_visible_blocks() {
        let mut model = covered(RectTopology::new(2, 1).unwrap(), 1);
        let color = model.blocks()[0].color();

        let mut out = Vec::new();
        write_visual(&model, &mut out).unwrap();
        let painted = String::from_utf8(out).unwrap();
        assert!(painted.contains(&format!("48;2;{};{};{}", color.r, color.g, color.b)));
        assert!(painted.contains('1'));

        for number in [1, 2] {
            let number = teselace_core::BlockNumber::new(number);
            model.block_mut(number).unwrap().set_visible(false);
        }
        let mut out = Vec::new();
        write_visual(&model, &mut out).unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "    \n");
    }
}
