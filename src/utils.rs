use plotters::prelude::*;

/// Index of the largest value, ties resolved to the lowest index.
#[inline(always)]
pub fn argmax<T: PartialOrd>(values: &[T]) -> usize {
    let mut result: usize = 0;
    for (i, v) in values.iter().enumerate() {
        if *v > values[result] {
            result = i;
        }
    }
    result
}

pub fn save_json(path: &str, data: serde_json::Value) -> std::io::Result<()> {
    let mut file = std::fs::File::create(path)?;
    serde_json::to_writer(&mut file, &data)?;
    Ok(())
}

const SERIES_COLORS: [RGBColor; 6] = [BLUE, RED, GREEN, MAGENTA, CYAN, YELLOW];

/// Draws one line per labeled series, x axis being the block index.
pub fn plot_blocks(
    path: &str,
    title: &str,
    series: &[(&str, &[f64])],
) -> Result<(), Box<dyn std::error::Error>> {
    let n_blocks = series.iter().map(|(_, v)| v.len()).max().unwrap_or(0);
    if n_blocks == 0 {
        return Ok(());
    }
    let mut min_value = f64::INFINITY;
    let mut max_value = f64::NEG_INFINITY;
    for (_, values) in series {
        for v in *values {
            min_value = min_value.min(*v);
            max_value = max_value.max(*v);
        }
    }
    if min_value == max_value {
        min_value -= 1.0;
        max_value += 1.0;
    }

    let root = BitMapBackend::new(path, (1024, 768)).into_drawing_area();
    root.fill(&WHITE)?;
    let mut chart = ChartBuilder::on(&root)
        .caption(title, ("sans-serif", 30))
        .margin(20)
        .x_label_area_size(40)
        .y_label_area_size(60)
        .build_cartesian_2d(0.0..n_blocks as f64, min_value..max_value)?;
    chart
        .configure_mesh()
        .x_desc("block")
        .y_desc("summed reward")
        .draw()?;

    for (i, (label, values)) in series.iter().enumerate() {
        let color = SERIES_COLORS[i % SERIES_COLORS.len()];
        chart
            .draw_series(LineSeries::new(
                values.iter().enumerate().map(|(x, y)| (x as f64, *y)),
                &color,
            ))?
            .label(*label)
            .legend(move |(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], color));
    }
    chart
        .configure_series_labels()
        .border_style(&BLACK)
        .background_style(&WHITE.mix(0.8))
        .draw()?;
    root.present()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::argmax;

    #[test]
    fn argmax_returns_position_of_largest_value() {
        assert_eq!(argmax(&[0.1, 0.7, 0.3]), 1);
        assert_eq!(argmax(&[5.0, 1.0, 2.0]), 0);
        assert_eq!(argmax(&[1.0, 2.0, 3.0]), 2);
    }

    #[test]
    fn argmax_breaks_ties_with_lowest_index() {
        assert_eq!(argmax(&[0.0, 0.0]), 0);
        assert_eq!(argmax(&[1.0, 3.0, 3.0, 2.0]), 1);
    }
}
