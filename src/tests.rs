#[cfg(test)]
mod drawing_tests {
    use crate::core::input::{Modifiers, PointerButton, PointerButtons};
    use crate::core::state::DrawingArea;
    use crate::editing::draw_event::ToolKind;
    use crate::geometry::path::PathSegment;
    use crate::rendering::scene_sync::SceneTree;
    use crate::rendering::tessellation::{
        tessellate_event, LyonTessellator, TessellationMode,
    };
    use bevy::color::Srgba;
    use bevy::math::Vec2;
    use std::time::Duration;

    fn ms(millis: u64) -> Duration {
        Duration::from_millis(millis)
    }

    fn drag(area: &mut DrawingArea, points: &[Vec2], start: Duration) {
        let Some((first, rest)) = points.split_first() else {
            return;
        };
        area.pointer_press(PointerButton::Primary, *first, start);
        let mut t = start;
        for point in rest {
            t += ms(16);
            area.pointer_move(
                PointerButtons::PRIMARY,
                *point,
                Modifiers::default(),
                t,
            );
        }
        let last = rest.last().copied().unwrap_or(*first);
        area.pointer_release(PointerButton::Primary, last, t + ms(16));
    }

    fn surface() -> DrawingArea {
        let mut area = DrawingArea::default();
        area.resize(Vec2::new(640.0, 480.0));
        area
    }

    fn assert_tree_matches(area: &DrawingArea, tree: &SceneTree) {
        let colors: Vec<Srgba> = area.events().iter().map(|e| e.pen_color).collect();
        let rendered: Vec<Srgba> = tree.children.iter().map(|c| c.color).collect();
        assert_eq!(rendered, colors);
    }

    #[test]
    fn test_freehand_gesture_scenario() {
        let mut area = surface();
        area.set_pen_width(4.0).unwrap();
        area.pointer_press(PointerButton::Primary, Vec2::ZERO, ms(0));
        area.pointer_move(
            PointerButtons::PRIMARY,
            Vec2::new(10.0, 0.0),
            Modifiers::default(),
            ms(16),
        );
        area.pointer_release(PointerButton::Primary, Vec2::new(10.0, 10.0), ms(32));

        assert_eq!(area.events().len(), 1);
        let event = &area.events()[0];
        assert_eq!(
            event.path.segments(),
            &[
                PathSegment::MoveTo(Vec2::ZERO),
                PathSegment::LineTo(Vec2::new(10.0, 0.0)),
                PathSegment::LineTo(Vec2::new(10.0, 10.0)),
            ]
        );

        let mesh = tessellate_event(&mut LyonTessellator::new(), event).unwrap();
        assert!(!mesh.vertices.is_empty());
        assert_eq!(mesh.indices.len() % 3, 0);
        assert!(mesh.is_well_formed());
    }

    #[test]
    fn test_rectangle_gesture_scenario() {
        let mut area = surface();
        area.set_tool(ToolKind::Rectangle);
        area.pointer_press(PointerButton::Primary, Vec2::new(5.0, 5.0), ms(0));
        area.pointer_move(
            PointerButtons::PRIMARY,
            Vec2::new(40.0, 40.0),
            Modifiers::default(),
            ms(16),
        );
        area.pointer_move(
            PointerButtons::PRIMARY,
            Vec2::new(20.0, 15.0),
            Modifiers::default(),
            ms(32),
        );

        let event = &area.events()[0];
        assert!(event.is_filled_shape);
        let bounds = event.path.control_bounds();
        assert_eq!(bounds.min, Vec2::new(5.0, 5.0));
        assert_eq!(bounds.max, Vec2::new(20.0, 15.0));
        // Replaced, not appended: a rectangle is always five segments
        assert_eq!(event.path.len(), 5);
    }

    #[test]
    fn test_undo_scenario_removes_one_trailing_node() {
        let mut area = surface();
        let mut tree = SceneTree::default();

        drag(&mut area, &[Vec2::ZERO, Vec2::new(30.0, 30.0)], ms(0));
        area.set_pen_color(Srgba::rgb(0.0, 0.5, 0.0));
        drag(&mut area, &[Vec2::new(50.0, 0.0), Vec2::new(60.0, 90.0)], ms(100));
        area.update_paint_node(&mut tree).unwrap();
        assert_eq!(tree.children.len(), 2);

        area.undo();
        assert_eq!(area.events().len(), 1);
        let report = area.update_paint_node(&mut tree).unwrap();
        assert_eq!(report.removed, 1);
        assert_eq!(tree.children.len(), 1);
        assert_tree_matches(&area, &tree);
    }

    #[test]
    fn test_undo_on_empty_model() {
        let mut area = surface();
        area.undo();
        area.undo();
        assert!(area.events().is_empty());
        assert!(!area.can_undo());
        assert!(area.take_notifications().is_empty());
    }

    #[test]
    fn test_idle_split_scenario() {
        let mut area = surface();
        area.pointer_press(PointerButton::Primary, Vec2::ZERO, ms(0));
        area.pointer_move(
            PointerButtons::PRIMARY,
            Vec2::new(10.0, 0.0),
            Modifiers::default(),
            ms(100),
        );
        area.pointer_move(
            PointerButtons::PRIMARY,
            Vec2::new(20.0, 5.0),
            Modifiers::default(),
            ms(1500),
        );

        assert_eq!(area.events().len(), 2);
        let first_end = area.events()[0].path.current_position();
        assert_eq!(
            area.events()[1].path.segments()[0],
            PathSegment::MoveTo(first_end)
        );
    }

    #[test]
    fn test_order_and_count_hold_across_mixed_edits() {
        let mut area = surface();
        let mut tree = SceneTree::default();
        let colors = [
            Srgba::rgb(1.0, 0.0, 0.0),
            Srgba::rgb(0.0, 1.0, 0.0),
            Srgba::rgb(0.0, 0.0, 1.0),
            Srgba::rgb(1.0, 1.0, 0.0),
        ];
        let tools = [ToolKind::Freehand, ToolKind::Ellipse, ToolKind::Rectangle];

        let mut t = ms(0);
        for step in 0..12usize {
            area.set_pen_color(colors[step % colors.len()]);
            area.set_tool(tools[step % tools.len()]);
            let start = Vec2::new(step as f32 * 7.0, 10.0);
            drag(&mut area, &[start, start + Vec2::new(25.0, 18.0)], t);
            t += ms(200);

            if step % 3 == 2 {
                area.undo();
            }
            if step % 4 == 1 {
                // Undo and a new gesture land in the same frame
                area.undo();
                area.set_pen_color(Srgba::rgb(0.3, 0.3, 0.3));
                drag(&mut area, &[start, start + Vec2::splat(5.0)], t);
                t += ms(200);
            }

            area.update_paint_node(&mut tree).unwrap();
            assert_eq!(tree.children.len(), area.events().len());
            assert_tree_matches(&area, &tree);
        }
    }

    #[test]
    fn test_in_progress_gesture_is_rendered_each_pass() {
        let mut area = surface();
        let mut tree = SceneTree::default();

        area.pointer_press(PointerButton::Primary, Vec2::ZERO, ms(0));
        area.update_paint_node(&mut tree).unwrap();
        let before = tree.children[0].mesh.clone();

        area.pointer_move(
            PointerButtons::PRIMARY,
            Vec2::new(80.0, 40.0),
            Modifiers::default(),
            ms(16),
        );
        assert!(area.needs_redraw());
        area.update_paint_node(&mut tree).unwrap();
        assert!(!area.needs_redraw());
        assert_ne!(tree.children[0].mesh, before);
    }

    #[test]
    fn test_resize_keeps_nodes() {
        let mut area = surface();
        let mut tree = SceneTree::default();
        drag(&mut area, &[Vec2::ZERO, Vec2::ONE * 20.0], ms(0));
        area.update_paint_node(&mut tree).unwrap();

        area.resize(Vec2::new(1024.0, 768.0));
        let report = area.update_paint_node(&mut tree).unwrap();
        assert!(report.resized);
        assert!(!report.created_root);
        let background = tree.background.as_ref().unwrap();
        assert_eq!(background.mesh.vertices[2], [1024.0, 768.0]);
        assert_eq!(tree.children.len(), 1);
    }

    #[test]
    fn test_degenerate_gestures_render() {
        let mut area = surface();
        let mut tree = SceneTree::default();

        // A click without movement
        drag(&mut area, &[Vec2::new(3.0, 3.0)], ms(0));
        area.set_tool(ToolKind::Ellipse);
        drag(&mut area, &[Vec2::new(9.0, 9.0)], ms(100));

        area.update_paint_node(&mut tree).unwrap();
        assert_eq!(tree.children.len(), 2);
        assert!(tree.children.iter().all(|c| c.mesh.is_well_formed()));
    }

    #[test]
    fn test_fill_and_stroke_modes() {
        let mut area = surface();
        drag(&mut area, &[Vec2::ZERO, Vec2::splat(10.0)], ms(0));
        area.set_tool(ToolKind::Rectangle);
        drag(&mut area, &[Vec2::ZERO, Vec2::splat(10.0)], ms(100));

        use crate::rendering::tessellation::mode_for;
        assert_eq!(
            mode_for(&area.events()[0]),
            TessellationMode::Stroke {
                width: area.pen_width()
            }
        );
        assert_eq!(mode_for(&area.events()[1]), TessellationMode::Fill);
    }

    #[test]
    fn test_oversized_stroke_does_not_block_later_strokes() {
        let mut area = surface();
        let mut tree = SceneTree::default();

        // A zigzag with more samples than a u16 index buffer can hold
        area.pointer_press(PointerButton::Primary, Vec2::ZERO, ms(0));
        for i in 1..40_000u64 {
            let y = if i % 2 == 0 { 10.0 } else { 300.0 };
            area.pointer_move(
                PointerButtons::PRIMARY,
                Vec2::new((i % 600) as f32, y),
                Modifiers::default(),
                ms(i),
            );
        }
        area.pointer_release(PointerButton::Primary, Vec2::new(5.0, 5.0), ms(40_000));

        let err = area.update_paint_node(&mut tree).unwrap_err();
        assert_eq!(err.failures.len(), 1);
        assert_eq!(tree.children.len(), 1);
        assert!(tree.children[0].mesh.is_empty());
        assert!(area.needs_redraw());

        drag(&mut area, &[Vec2::new(20.0, 20.0), Vec2::new(80.0, 60.0)], ms(41_000));
        let err = area.update_paint_node(&mut tree).unwrap_err();
        assert_eq!(err.report.appended, 1);
        assert_eq!(tree.children.len(), area.events().len());
        assert!(!tree.children[1].mesh.is_empty());
        assert_tree_matches(&area, &tree);

        // Only the last node is rebuilt from here on, and it is fine
        area.update_paint_node(&mut tree).unwrap();
        assert!(!area.needs_redraw());
        assert!(tree.children[0].mesh.is_empty());
        assert_eq!(tree.children.len(), 2);
    }

    #[test]
    fn test_export_scenario() {
        let mut area = surface();
        drag(&mut area, &[Vec2::ZERO, Vec2::splat(10.0)], ms(0));
        area.set_tool(ToolKind::Ellipse);
        drag(&mut area, &[Vec2::splat(20.0), Vec2::splat(60.0)], ms(100));

        let dir = tempfile::tempdir().unwrap();
        let destination = dir.path().join("drawing.svg");
        area.export_to_vector_file(&destination).unwrap();

        let written = std::fs::read_to_string(&destination).unwrap();
        assert_eq!(written.matches("<path").count(), 2);
    }
}
