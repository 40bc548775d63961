use wgpu_particle_viewer::{
    Color, Error, FlyKey, FrameHandle, FrameLoopState, HostEvent, Line, ListenerId, Options,
    Renderer, SceneObject, Session, create, glam::*,
};

use crate::common::{RecordingComponents, given};

fn point_cloud<H, C>(session: &Session<H, C>) -> &wgpu_particle_viewer::PointCloud
where
    H: wgpu_particle_viewer::Host,
    C: wgpu_particle_viewer::Components,
{
    session
        .scene()
        .iter()
        .find_map(|(_, object)| match object {
            SceneObject::Points(points) => Some(points),
            _ => None,
        })
        .expect("point cloud")
}

#[test]
fn test_session_new_should_attach_surface_and_subscribe() {
    let host = given::host();
    let session = given::session(&host);

    assert!(session.is_alive());
    assert_eq!(session.state(), FrameLoopState::Scheduled);
    assert_eq!(host.children(), vec![session.renderer().surface()]);
    assert_eq!(host.pending_frames(), 1);
    assert_eq!(host.resize_listeners(), 1);
    assert!(session.scene().contains_camera());
    assert!(!session.scene().sort_objects);
    assert_eq!(session.renderer().size(), uvec2(800, 600));
    assert_eq!(session.renderer().clear_color(), Color::BLACK);
    assert!(session.particles().is_empty());
    assert!(!session.input().is_destroyed());
    assert!(!session.hit_test().is_destroyed());
}

#[test]
fn test_session_new_should_size_camera_from_container() {
    let host = given::host();
    let session = given::session(&host);

    assert_eq!(session.camera().aspect, 800.0 / 600.0);
    assert_eq!(
        session.camera().projection_matrix(),
        Mat4::perspective_rh(45f32.to_radians(), 800.0 / 600.0, 1.0, 20000.0)
    );
}

#[test]
fn test_session_new_when_clear_color_is_set_should_apply_clear_color() {
    let host = given::host();
    let session = Session::new(host.clone(), Options::default().with_clear_color("#112233"))
        .expect("session");

    assert_eq!(session.renderer().clear_color(), Color::from_rgb(0x11, 0x22, 0x33));
    assert_eq!(session.renderer().clear_alpha(), 1.0);
}

#[test]
fn test_session_new_when_options_are_invalid_should_fail_without_side_effects() {
    let host = given::host();
    let result = Session::new(host.clone(), Options::default().with_input_time_step(f32::NAN));

    assert!(matches!(
        result,
        Err(Error::InvalidOption {
            name: "input_time_step",
            ..
        })
    ));
    assert!(host.children().is_empty());
    assert_eq!(host.pending_frames(), 0);
    assert_eq!(host.resize_listeners(), 0);
}

#[test]
fn test_session_new_when_hit_tester_creation_fails_should_propagate_error() {
    let host = given::host();
    let components = RecordingComponents::failing_hit_tester(0);

    let result = Session::with_components(host.clone(), Options::default(), components);

    assert!(matches!(result, Err(Error::HitTester(_))));
    assert!(host.children().is_empty());
    assert_eq!(host.pending_frames(), 0);
    assert_eq!(host.resize_listeners(), 0);
}

#[test]
fn test_session_handle_event_when_frame_is_due_should_render_and_reschedule() {
    let host = given::host();
    let mut session = given::session(&host);

    assert_eq!(host.dispatch(&mut session).expect("dispatch"), 1);
    assert_eq!(session.renderer().frames(), 1);
    assert_eq!(host.pending_frames(), 1);

    assert_eq!(host.dispatch(&mut session).expect("dispatch"), 1);
    assert_eq!(session.renderer().frames(), 2);
    assert_eq!(host.pending_frames(), 1);
}

#[test]
fn test_session_handle_event_when_frame_is_stale_should_be_ignored() {
    let host = given::host();
    let mut session = given::session(&host);

    session
        .handle_event(HostEvent::Frame(FrameHandle(u64::MAX)))
        .expect("handle event");

    assert_eq!(session.renderer().frames(), 0);
    assert_eq!(host.pending_frames(), 1);
}

#[test]
fn test_session_handle_event_when_resize_is_not_ours_should_be_ignored() {
    let host = given::host();
    let mut session = given::session(&host);
    let aspect = session.camera().aspect;

    host.resize(uvec2(1000, 500));
    session
        .handle_event(HostEvent::Resize(ListenerId(u64::MAX)))
        .expect("handle event");

    assert_eq!(session.camera().aspect, aspect);
    assert_eq!(session.renderer().size(), uvec2(800, 600));
}

#[test]
fn test_session_frame_should_advance_input_by_fixed_time_step() {
    let host = given::host();
    let mut session = given::session(&host);

    session.input_mut().key(FlyKey::Forward, true);
    host.dispatch(&mut session).expect("dispatch");

    let expected = -Options::DEFAULT_INPUT_TIME_STEP * session.options().movement_speed;
    assert!((session.camera().pos.z - expected).abs() < 1e-4);

    host.dispatch(&mut session).expect("dispatch");
    assert!((session.camera().pos.z - expected * 2.0).abs() < 1e-4);
}

#[test]
fn test_session_frame_when_time_step_is_configured_should_use_it() {
    let host = given::host();
    let mut session = Session::new(
        host.clone(),
        Options::default()
            .with_input_time_step(0.5)
            .with_movement_speed(10.0),
    )
    .expect("session");

    session.input_mut().key(FlyKey::Right, true);
    host.dispatch(&mut session).expect("dispatch");

    assert!((session.camera().pos.x - 5.0).abs() < 1e-4);
}

#[test]
fn test_session_frame_should_update_hit_tester() {
    let host = given::host();
    let mut session = given::session(&host);
    session
        .set_particles([vec3(0.0, 0.0, -10.0)])
        .expect("set particles");

    session.hit_test_mut().pointer_moved(vec2(400.0, 300.0));
    host.dispatch(&mut session).expect("dispatch");

    assert_eq!(session.hit_test().hit().map(|hit| hit.index), Some(0));
}

#[test]
fn test_session_frame_when_render_fails_should_return_error_and_keep_loop_alive() {
    let host = given::host();
    let components = RecordingComponents::new();
    let fail_render = components.fail_render.clone();
    let mut session =
        Session::with_components(host.clone(), Options::default(), components).expect("session");

    session.input_mut().key(FlyKey::Forward, true);
    fail_render.set(true);

    assert!(matches!(
        host.dispatch(&mut session),
        Err(Error::Renderer(_))
    ));
    assert_eq!(host.pending_frames(), 1);
    assert_eq!(session.hit_test().updates, 0);
    assert_eq!(session.camera().pos, Vec3::ZERO);

    fail_render.set(false);
    host.dispatch(&mut session).expect("dispatch");

    assert_eq!(session.renderer().inner.frames(), 1);
    assert_eq!(session.hit_test().updates, 1);
}

#[test]
fn test_session_particles_should_return_coordinates_last_set() {
    let host = given::host();
    let mut session = given::session(&host);

    session
        .set_particles(given::coordinates())
        .expect("set particles");

    assert_eq!(session.particles(), given::coordinates().as_slice());
}

#[test]
fn test_session_set_particles_when_given_arrays_should_convert_to_vectors() {
    let host = given::host();
    let mut session = given::session(&host);

    session
        .set_particles([[0.0, 0.0, 0.0], [1.0, 1.0, 1.0]])
        .expect("set particles");

    assert_eq!(session.particles(), &[Vec3::ZERO, Vec3::ONE]);
}

#[test]
fn test_session_set_particles_should_be_chainable() {
    let host = given::host();
    let mut session = given::session(&host);

    session
        .set_particles([Vec3::ZERO])
        .expect("set particles")
        .set_particles([Vec3::ONE, Vec3::NEG_ONE])
        .expect("set particles");

    assert_eq!(session.particles(), &[Vec3::ONE, Vec3::NEG_ONE]);
}

#[test]
fn test_session_set_particles_should_recreate_hit_tester_after_destroying_previous() {
    let host = given::host();
    let components = RecordingComponents::new();
    let log = components.log.clone();
    let mut session =
        Session::with_components(host.clone(), Options::default(), components).expect("session");

    session
        .set_particles(given::coordinates())
        .expect("set particles");

    assert_eq!(
        *log.borrow(),
        vec!["create 0 (0 points)", "destroy 0", "create 1 (3 points)"]
    );
    assert_eq!(session.hit_test().id, 1);
    assert_eq!(
        session.hit_test().inner.coordinates(),
        given::coordinates().as_slice()
    );
}

#[test]
fn test_session_particles_should_not_recreate_hit_tester() {
    let host = given::host();
    let components = RecordingComponents::new();
    let log = components.log.clone();
    let session =
        Session::with_components(host.clone(), Options::default(), components).expect("session");

    let _ = session.particles();
    let _ = session.particles();

    assert_eq!(*log.borrow(), vec!["create 0 (0 points)"]);
}

#[test]
fn test_session_set_particles_when_hit_tester_creation_fails_should_propagate_error() {
    let host = given::host();
    let components = RecordingComponents::failing_hit_tester(1);
    let mut session =
        Session::with_components(host.clone(), Options::default(), components).expect("session");

    assert!(matches!(
        session.set_particles(given::coordinates()),
        Err(Error::HitTester(_))
    ));
    assert_eq!(session.particles(), given::coordinates().as_slice());
}

#[test]
fn test_session_highlight_when_color_and_scale_are_invalid_should_use_defaults() {
    let host = given::host();
    let mut defaulted = given::session(&host);
    let mut explicit = given::session(&host);
    for session in [&mut defaulted, &mut explicit] {
        session
            .set_particles(given::coordinates())
            .expect("set particles");
    }

    defaulted
        .highlight(&[0, 2], "not a color", None::<f32>)
        .expect("highlight");
    explicit
        .highlight(&[0, 2], 0xff0000u32, 1.0)
        .expect("highlight");

    assert_eq!(point_cloud(&defaulted), point_cloud(&explicit));
    assert_eq!(point_cloud(&defaulted).colors[0], Color::RED);
    assert_eq!(point_cloud(&defaulted).colors[1], Color::WHITE);
}

#[test]
fn test_session_highlight_when_scale_is_not_finite_should_use_one() {
    let host = given::host();
    let mut session = given::session(&host);
    session
        .set_particles(given::coordinates())
        .expect("set particles");

    session
        .highlight(&[1], Color::from_rgb(0, 255, 0), f32::NAN)
        .expect("highlight");

    let points = point_cloud(&session);
    assert_eq!(points.sizes[1], points.base_size);
    assert_eq!(points.colors[1], Color::from_rgb(0, 255, 0));
}

#[test]
fn test_session_highlight_when_black_is_given_should_keep_black() {
    let host = given::host();
    let mut session = given::session(&host);
    session
        .set_particles(given::coordinates())
        .expect("set particles");

    session
        .highlight(&[0], 0x000000u32, 2.0)
        .expect("highlight");

    let points = point_cloud(&session);
    assert_eq!(points.colors[0], Color::BLACK);
    assert_eq!(points.sizes[0], points.base_size * 2.0);
}

#[test]
fn test_session_lines_should_forward_to_line_view() {
    let host = given::host();
    let mut session = given::session(&host);
    let lines = [
        Line::new([0.0, 0.0, 0.0], [1.0, 0.0, 0.0]),
        Line::new([0.0, 0.0, 0.0], [0.0, 1.0, 0.0]).with_color(Color::RED),
    ];

    session.lines(&lines).expect("lines");
    host.dispatch(&mut session).expect("dispatch");

    let segments = session
        .scene()
        .iter()
        .find_map(|(_, object)| match object {
            SceneObject::Lines(lines) => Some(lines),
            _ => None,
        })
        .expect("line segments");
    assert_eq!(segments.lines, lines);
    assert_eq!(
        session.renderer().last_frame().map(|frame| frame.lines),
        Some(2)
    );
}

#[test]
fn test_session_resize_should_update_camera_and_renderer_in_place() {
    let host = given::host();
    let mut session = given::session(&host);
    let surface = session.renderer().surface();

    host.resize(uvec2(1024, 768));
    host.dispatch(&mut session).expect("dispatch");

    assert_eq!(session.camera().aspect, 1024.0 / 768.0);
    assert_eq!(
        session.camera().projection_matrix(),
        Mat4::perspective_rh(45f32.to_radians(), 1024.0 / 768.0, 1.0, 20000.0)
    );
    assert_eq!(session.renderer().size(), uvec2(1024, 768));
    assert_eq!(session.renderer().surface(), surface);
    assert_eq!(host.children(), vec![surface]);
}

#[test]
fn test_session_resize_when_container_is_zero_sized_should_be_ignored() {
    let host = given::host();
    let mut session = given::session(&host);

    host.resize(uvec2(0, 600));
    host.dispatch(&mut session).expect("dispatch");

    assert_eq!(session.camera().aspect, 800.0 / 600.0);
    assert_eq!(session.renderer().size(), uvec2(800, 600));
}

#[test]
fn test_session_destroy_should_release_everything() {
    let host = given::host();
    let mut session = given::session(&host);

    session.destroy().expect("destroy");

    assert!(!session.is_alive());
    assert_eq!(session.state(), FrameLoopState::Stopped);
    assert!(host.children().is_empty());
    assert_eq!(host.pending_frames(), 0);
    assert_eq!(host.resize_listeners(), 0);
    assert!(session.hit_test().is_destroyed());
    assert!(session.input().is_destroyed());
}

#[test]
fn test_session_destroy_when_called_twice_should_fail() {
    let host = given::host();
    let mut session = given::session(&host);

    session.destroy().expect("destroy");

    assert!(matches!(session.destroy(), Err(Error::SessionDestroyed)));
}

#[test]
fn test_session_when_destroyed_should_reject_mutations() {
    let host = given::host();
    let mut session = given::session(&host);
    session.destroy().expect("destroy");

    assert!(matches!(
        session.set_particles([Vec3::ZERO]),
        Err(Error::SessionDestroyed)
    ));
    assert!(matches!(
        session.highlight(&[0], Color::RED, 1.0),
        Err(Error::SessionDestroyed)
    ));
    assert!(matches!(
        session.lines(&[Line::new(Vec3::ZERO, Vec3::ONE)]),
        Err(Error::SessionDestroyed)
    ));
}

#[test]
fn test_session_when_destroyed_should_ignore_resize_and_frames() {
    let host = given::host();
    let mut session = given::session(&host);
    let undelivered = host.poll_events();

    session.destroy().expect("destroy");
    host.resize(uvec2(1024, 768));

    assert_eq!(host.dispatch(&mut session).expect("dispatch"), 0);
    for event in undelivered {
        session.handle_event(event).expect("handle event");
    }

    assert_eq!(session.camera().aspect, 800.0 / 600.0);
    assert_eq!(session.renderer().size(), uvec2(800, 600));
    assert_eq!(session.renderer().frames(), 0);
    assert_eq!(host.pending_frames(), 0);
}

#[test]
fn test_session_drop_when_alive_should_release_subscriptions() {
    let host = given::host();
    {
        let _session = given::session(&host);
        assert_eq!(host.resize_listeners(), 1);
    }

    assert!(host.children().is_empty());
    assert_eq!(host.pending_frames(), 0);
    assert_eq!(host.resize_listeners(), 0);
}

#[test]
fn test_sessions_sharing_host_should_not_observe_each_other() {
    let host = given::host();
    let mut first = given::session(&host);
    let mut second = given::session(&host);

    first.destroy().expect("destroy");
    host.resize(uvec2(400, 400));

    assert_eq!(host.dispatch(&mut first).expect("dispatch"), 0);
    assert_eq!(host.dispatch(&mut second).expect("dispatch"), 2);

    assert_eq!(first.renderer().frames(), 0);
    assert_eq!(second.renderer().frames(), 1);
    assert_eq!(second.camera().aspect, 1.0);
    assert_eq!(host.children(), vec![second.renderer().surface()]);
}

#[test]
fn test_host_dispatch_when_sessions_share_host_should_keep_both_loops_running() {
    let host = given::host();
    let mut first = given::session(&host);
    let mut second = given::session(&host);

    for _ in 0..2 {
        assert_eq!(host.dispatch(&mut first).expect("dispatch"), 1);
        assert_eq!(host.dispatch(&mut second).expect("dispatch"), 1);
    }

    assert_eq!(first.renderer().frames(), 2);
    assert_eq!(second.renderer().frames(), 2);
    assert_eq!(first.state(), FrameLoopState::Scheduled);
    assert_eq!(second.state(), FrameLoopState::Scheduled);
    assert_eq!(host.pending_frames(), 2);
}

#[test]
fn test_host_dispatch_when_session_resizes_should_leave_other_resize_queued() {
    let host = given::host();
    let mut first = given::session(&host);
    let mut second = given::session(&host);

    host.resize(uvec2(1000, 500));
    host.dispatch(&mut first).expect("dispatch");

    assert_eq!(first.camera().aspect, 2.0);
    assert_eq!(second.camera().aspect, 800.0 / 600.0);

    host.dispatch(&mut second).expect("dispatch");

    assert_eq!(second.camera().aspect, 2.0);
}

#[test]
fn test_host_dispatch_when_render_fails_should_not_lose_other_signals() {
    let host = given::host();
    let components = RecordingComponents::new();
    components.fail_render.set(true);
    let mut failing =
        Session::with_components(host.clone(), Options::default(), components).expect("session");
    let mut healthy = given::session(&host);

    assert!(matches!(
        host.dispatch(&mut failing),
        Err(Error::Renderer(_))
    ));
    assert_eq!(host.pending_frames(), 2);

    assert_eq!(host.dispatch(&mut healthy).expect("dispatch"), 1);
    assert_eq!(healthy.renderer().frames(), 1);
}

#[test]
fn test_session_accepts_should_match_live_subscriptions() {
    let host = given::host();
    let mut session = given::session(&host);
    let events = host.poll_events();

    assert_eq!(events.len(), 1);
    assert!(session.accepts(&events[0]));
    assert!(!session.accepts(&HostEvent::Frame(FrameHandle(u64::MAX))));
    assert!(!session.accepts(&HostEvent::Resize(ListenerId(u64::MAX))));

    session.destroy().expect("destroy");

    assert!(!session.accepts(&events[0]));
}

#[test]
fn test_create_end_to_end() {
    let host = given::host();
    let mut session = create(host.clone(), Options::default()).expect("session");

    assert_eq!(session.camera().aspect, 800.0 / 600.0);

    session
        .set_particles([[0.0, 0.0, 0.0], [1.0, 1.0, 1.0]])
        .expect("set particles");
    assert_eq!(session.particles(), &[vec3(0.0, 0.0, 0.0), vec3(1.0, 1.0, 1.0)]);

    host.dispatch(&mut session).expect("dispatch");
    assert_eq!(
        session.renderer().last_frame().map(|frame| frame.points),
        Some(2)
    );

    session.destroy().expect("destroy");
    host.resize(uvec2(1920, 1080));

    assert_eq!(host.dispatch(&mut session).expect("dispatch"), 0);
    assert_eq!(session.camera().aspect, 800.0 / 600.0);
    assert_eq!(session.renderer().size(), uvec2(800, 600));
}
