use plotters::prelude::*;

const COLORS: [RGBColor; 3] = [BLUE, RED, GREEN];

pub fn draw_series(
    filename: &str,
    title: &str,
    x_label: &str,
    y_label: &str,
    x: &[f64],
    series: &[(&str, &[f64])],
) -> Result<(), Box<dyn std::error::Error>> {
    if x.is_empty() {
        return Ok(());
    }

    let root = BitMapBackend::new(filename, (1024, 768)).into_drawing_area();
    root.fill(&WHITE)?;

    let x_min = x.iter().cloned().fold(f64::INFINITY, f64::min);
    let mut x_max = x.iter().cloned().fold(f64::NEG_INFINITY, f64::max);
    if x_max - x_min < 1e-12 {
        x_max = x_min + 1.0;
    }
    let mut y_min = series
        .iter()
        .flat_map(|(_, y)| y.iter().cloned())
        .fold(f64::INFINITY, f64::min);
    let mut y_max = series
        .iter()
        .flat_map(|(_, y)| y.iter().cloned())
        .fold(f64::NEG_INFINITY, f64::max);
    // flat traces still need a visible band
    if y_max - y_min < 1e-9 {
        y_min -= 1.0;
        y_max += 1.0;
    }

    let mut chart = ChartBuilder::on(&root)
        .caption(title, ("Arial", 28))
        .margin(20)
        .x_label_area_size(40)
        .y_label_area_size(60)
        .build_cartesian_2d(x_min..x_max, y_min..y_max)?;

    chart.configure_mesh().x_desc(x_label).y_desc(y_label).draw()?;

    for (i, (name, y)) in series.iter().enumerate() {
        let color = COLORS[i % COLORS.len()];
        chart
            .draw_series(LineSeries::new(
                x.iter().cloned().zip(y.iter().cloned()),
                &color,
            ))?
            .label(*name)
            .legend(move |(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], color.filled()));
    }

    chart.configure_series_labels().border_style(&BLACK).draw()?;

    root.present()?;
    Ok(())
}
