use iced::{
    mouse,
    widget::canvas::{self, Frame, Geometry, Path, Stroke},
    Color, Point, Rectangle, Renderer, Theme,
};

/// Line chart over a categorical x-axis: one evenly spaced sample per label.
#[derive(Clone)]
pub struct SeriesChart {
    pub data: Vec<f32>,
}

impl SeriesChart {
    pub fn new(values: &[f64]) -> Self {
        Self {
            data: values.iter().map(|&v| v as f32).collect(),
        }
    }
}

impl<Message> canvas::Program<Message> for SeriesChart {
    type State = ();

    fn draw(
        &self,
        _state: &Self::State,
        renderer: &Renderer,
        _theme: &Theme,
        bounds: Rectangle,
        _cursor: mouse::Cursor,
    ) -> Vec<Geometry> {
        let mut frame = Frame::new(renderer, bounds.size());
        frame.fill_rectangle(
            Point::ORIGIN,
            bounds.size(),
            Color::from_rgb(0.05, 0.05, 0.05),
        );

        if self.data.is_empty() {
            return vec![frame.into_geometry()];
        }

        let min = self.data.iter().cloned().fold(0.0, f32::min);
        let max = self.data.iter().cloned().fold(f32::NEG_INFINITY, f32::max);
        let range = (max - min).max(f32::EPSILON);
        let step = if self.data.len() > 1 {
            bounds.width / (self.data.len() as f32 - 1.0)
        } else {
            0.0
        };
        let to_point = |i: usize, value: f32| {
            let normalized = (value - min) / range;
            Point::new(i as f32 * step, bounds.height - normalized * bounds.height)
        };

        let baseline_y = bounds.height + min / range * bounds.height;
        let baseline = Path::line(
            Point::new(0.0, baseline_y),
            Point::new(bounds.width, baseline_y),
        );
        frame.stroke(
            &baseline,
            Stroke::default()
                .with_width(1.0)
                .with_color(Color::from_rgb(0.35, 0.35, 0.45)),
        );

        let path = Path::new(|builder| {
            for (i, value) in self.data.iter().enumerate() {
                let point = to_point(i, *value);
                if i == 0 {
                    builder.move_to(point);
                } else {
                    builder.line_to(point);
                }
            }
        });
        frame.stroke(
            &path,
            Stroke::default()
                .with_width(2.5)
                .with_color(Color::from_rgb(0.29, 0.75, 0.75)),
        );

        for (i, value) in self.data.iter().enumerate() {
            let marker = Path::circle(to_point(i, *value), 3.0);
            frame.fill(&marker, Color::from_rgb(0.29, 0.75, 0.75));
        }

        vec![frame.into_geometry()]
    }
}
