use wgpu_particle_viewer::{CameraBuffer, CameraPod, CameraTrait, PerspectiveCamera, glam::*};

use crate::common::TestContext;

#[test]
fn test_camera_buffer_new_should_return_correct_buffer() {
    let Some(ctx) = TestContext::try_new() else {
        return;
    };
    let buffer = CameraBuffer::new(&ctx.device);

    assert_eq!(
        buffer.buffer().size(),
        std::mem::size_of::<CameraPod>() as wgpu::BufferAddress
    );
    assert_eq!(buffer.buffer().usage(), CameraBuffer::DEFAULT_USAGES);

    buffer.update(&ctx.queue, &PerspectiveCamera::new(1.0, 1.0, 0.1..100.0), uvec2(8, 8));
    let wgpu_buffer = wgpu::Buffer::from(buffer.clone());
    assert_eq!(wgpu_buffer.size(), buffer.buffer().size());
}

#[test]
fn test_camera_pod_new_should_return_correct_pod() {
    let camera = PerspectiveCamera::new(std::f32::consts::FRAC_PI_4, 1.0, 0.1..100.0);
    let size = UVec2::new(1280, 720);
    let pod = CameraPod::new(&camera, size);

    assert_eq!(pod.view, camera.view());
    assert_eq!(pod.proj, camera.projection(1280.0 / 720.0));
    assert_eq!(pod.size, size.as_vec2());
}

#[test]
fn test_camera_pod_new_with_modified_camera_should_return_correct_pod() {
    let mut camera = PerspectiveCamera::new(std::f32::consts::FRAC_PI_4, 1.0, 0.1..100.0);
    camera.pos = Vec3::new(5.0, 10.0, 15.0);
    camera.rotate_local(Quat::from_rotation_x(std::f32::consts::FRAC_PI_6));
    camera.rotate_local(Quat::from_rotation_y(std::f32::consts::FRAC_PI_4));

    let size = UVec2::new(1024, 768);
    let pod = CameraPod::new(&camera, size);

    assert_eq!(pod.view, camera.view());
    assert_eq!(pod.proj, camera.projection(1024.0 / 768.0));
    assert_eq!(pod.size, size.as_vec2());
}

#[test]
fn test_camera_pod_new_when_size_is_zero_should_clamp() {
    let camera = PerspectiveCamera::new(std::f32::consts::FRAC_PI_4, 1.0, 0.1..100.0);

    let pod = CameraPod::new(&camera, UVec2::ZERO);

    assert_eq!(pod.size, Vec2::ONE);
    assert!(pod.proj.is_finite());
}

#[test]
fn test_camera_pod_new_when_camera_matches_viewport_should_use_cached_projection() {
    let mut camera = PerspectiveCamera::new(std::f32::consts::FRAC_PI_4, 1.0, 0.1..100.0);
    camera.aspect = 1024.0 / 768.0;
    camera.update_projection_matrix();

    let pod = CameraPod::new(&camera, uvec2(1024, 768));

    assert_eq!(pod.proj, camera.projection_matrix());
}
