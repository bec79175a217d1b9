//! GPU tests for the update and display kernels.
//!
//! Each test acquires a headless device. Machines without any adapter skip
//! the test body instead of failing.

use gpu_life::gfx::rendering::{KernelConfig, KernelPipeline};
use gpu_life::gfx::resources::read_rgba;
use gpu_life::gfx::GpuContext;
use gpu_life::{CellGrid, LifeConfig, LifeError, LifeSimulation, Pattern};
use rand::{rngs::StdRng, SeedableRng};

const TARGET_FORMAT: wgpu::TextureFormat = wgpu::TextureFormat::Rgba8Unorm;
const ALIVE: [f32; 4] = [222.0 / 255.0, 222.0 / 255.0, 222.0 / 255.0, 1.0];
const DEAD: [f32; 4] = [45.0 / 255.0, 45.0 / 255.0, 45.0 / 255.0, 1.0];

fn gpu() -> Option<GpuContext> {
    match GpuContext::headless() {
        Ok(gpu) => Some(gpu),
        Err(e) => {
            eprintln!("skipping GPU test: {}", e);
            None
        }
    }
}

fn config(sim: (u32, u32), window: (u32, u32)) -> LifeConfig {
    LifeConfig::default()
        .with_sim_size(sim.0, sim.1)
        .with_window_size(window.0, window.1)
        .with_colors(ALIVE, DEAD)
}

fn simulation(gpu: &GpuContext, seed: &CellGrid) -> LifeSimulation {
    let size = (seed.width(), seed.height());
    LifeSimulation::new(
        gpu.device.clone(),
        gpu.queue.clone(),
        &config(size, size),
        TARGET_FORMAT,
        seed,
    )
    .expect("simulation setup")
}

fn display_target(gpu: &GpuContext, width: u32, height: u32) -> wgpu::Texture {
    gpu.device.create_texture(&wgpu::TextureDescriptor {
        label: Some("Test Display Target"),
        size: wgpu::Extent3d {
            width,
            height,
            depth_or_array_layers: 1,
        },
        mip_level_count: 1,
        sample_count: 1,
        dimension: wgpu::TextureDimension::D2,
        format: TARGET_FORMAT,
        usage: wgpu::TextureUsages::RENDER_ATTACHMENT | wgpu::TextureUsages::COPY_SRC,
        view_formats: &[],
    })
}

fn to_bytes(color: [f32; 4]) -> [u8; 4] {
    color.map(|c| (c * 255.0).round() as u8)
}

#[test]
fn test_matches_cpu_reference_on_random_grid() {
    let Some(gpu) = gpu() else { return };
    let mut expected = CellGrid::random(37, 23, &mut StdRng::seed_from_u64(7));
    let mut sim = simulation(&gpu, &expected);

    for generation in 1..=8 {
        sim.step();
        expected = expected.step();
        assert_eq!(sim.read_state().unwrap(), expected, "generation {}", generation);
    }
}

#[test]
fn test_lone_cell_dies() {
    let Some(gpu) = gpu() else { return };
    let mut seed = CellGrid::new(4, 4);
    seed.set(1, 1, true);
    let mut sim = simulation(&gpu, &seed);

    sim.step();
    assert_eq!(sim.read_state().unwrap().live_count(), 0);
}

#[test]
fn test_dead_grid_stays_dead() {
    let Some(gpu) = gpu() else { return };
    let seed = CellGrid::new(16, 16);
    let mut sim = simulation(&gpu, &seed);

    for _ in 0..3 {
        sim.step();
        assert_eq!(sim.read_state().unwrap(), seed);
    }
}

#[test]
fn test_block_and_blinker() {
    let Some(gpu) = gpu() else { return };

    let block = Pattern::Block.seeded(8, 8, 3, 3);
    let mut sim = simulation(&gpu, &block);
    sim.step();
    assert_eq!(sim.read_state().unwrap(), block);

    let blinker = Pattern::Blinker.seeded(8, 8, 2, 4);
    let mut sim = simulation(&gpu, &blinker);
    sim.step();
    let vertical = sim.read_state().unwrap();
    assert_ne!(vertical, blinker);
    assert_eq!(vertical, blinker.step());
    sim.step();
    assert_eq!(sim.read_state().unwrap(), blinker);
}

#[test]
fn test_neighbours_wrap_around_edges() {
    let Some(gpu) = gpu() else { return };
    let (w, h) = (6i64, 5i64);
    // (w-1, h-1) sees all three only through the wrap: one birth
    let mut seed = CellGrid::new(w as u32, h as u32);
    seed.set(0, 0, true);
    seed.set(w - 1, 0, true);
    seed.set(0, h - 1, true);
    let mut sim = simulation(&gpu, &seed);

    sim.step();
    let next = sim.read_state().unwrap();
    assert!(next.get(w - 1, h - 1));
    assert_eq!(next, seed.step());
}

#[test]
fn test_glider_crosses_the_seam() {
    let Some(gpu) = gpu() else { return };
    let seed = Pattern::Glider.seeded(8, 8, 6, 6);
    let mut sim = simulation(&gpu, &seed);

    for _ in 0..4 {
        sim.step();
    }
    assert_eq!(sim.read_state().unwrap(), Pattern::Glider.seeded(8, 8, 7, 7));
}

#[test]
fn test_swap_parity_tracks_generation() {
    let Some(gpu) = gpu() else { return };
    let seed = CellGrid::random(16, 16, &mut StdRng::seed_from_u64(3));
    let mut sim = simulation(&gpu, &seed);
    assert_eq!((sim.generation(), sim.front_index()), (0, 0));

    for n in 1..=5u64 {
        sim.step();
        assert_eq!(sim.generation(), n);
        assert_eq!(sim.front_index() as u64, n % 2);
    }
}

#[test]
fn test_display_maps_only_alive_to_alive_color() {
    let Some(gpu) = gpu() else { return };
    let seed = CellGrid::random(16, 12, &mut StdRng::seed_from_u64(11));
    let sim = simulation(&gpu, &seed);
    let target = display_target(&gpu, 16, 12);

    sim.draw(&target.create_view(&wgpu::TextureViewDescriptor::default()));
    let pixels = read_rgba(&gpu.device, &gpu.queue, &target).unwrap();

    let (alive, dead) = (to_bytes(ALIVE), to_bytes(DEAD));
    for (i, pixel) in pixels.chunks_exact(4).enumerate() {
        let (x, y) = ((i % 16) as i64, (i / 16) as i64);
        let expected = if seed.get(x, y) { alive } else { dead };
        assert_eq!(pixel, &expected[..], "pixel ({}, {})", x, y);
    }
}

#[test]
fn test_display_resamples_to_window_size() {
    let Some(gpu) = gpu() else { return };
    let seed = Pattern::Glider.seeded(8, 8, 1, 1);
    let sim = LifeSimulation::new(
        gpu.device.clone(),
        gpu.queue.clone(),
        &config((8, 8), (16, 16)),
        TARGET_FORMAT,
        &seed,
    )
    .unwrap();
    let target = display_target(&gpu, 16, 16);

    sim.draw(&target.create_view(&wgpu::TextureViewDescriptor::default()));
    let pixels = read_rgba(&gpu.device, &gpu.queue, &target).unwrap();

    let (alive, dead) = (to_bytes(ALIVE), to_bytes(DEAD));
    for (i, pixel) in pixels.chunks_exact(4).enumerate() {
        let (px, py) = ((i % 16) as i64, (i / 16) as i64);
        let expected = if seed.get(px / 2, py / 2) { alive } else { dead };
        assert_eq!(pixel, &expected[..], "pixel ({}, {})", px, py);
    }
}

#[test]
fn test_frame_steps_then_draws_newest_generation() {
    let Some(gpu) = gpu() else { return };
    let seed = Pattern::Blinker.seeded(8, 8, 2, 4);
    let mut sim = simulation(&gpu, &seed);
    let target = display_target(&gpu, 8, 8);

    sim.frame(&target.create_view(&wgpu::TextureViewDescriptor::default()));
    assert_eq!(sim.generation(), 1);

    let pixels = read_rgba(&gpu.device, &gpu.queue, &target).unwrap();
    let shown = CellGrid::from_rgba(
        8,
        8,
        &pixels
            .chunks_exact(4)
            .flat_map(|p| if p == &to_bytes(ALIVE)[..] { [255u8; 4] } else { [0u8; 4] })
            .collect::<Vec<_>>(),
    )
    .unwrap();
    assert_eq!(shown, seed.step());
}

#[test]
fn test_upload_rejects_wrong_size() {
    let Some(gpu) = gpu() else { return };
    let mut sim = simulation(&gpu, &CellGrid::new(8, 8));
    let result = sim.upload(&CellGrid::new(4, 8));
    assert!(matches!(result, Err(LifeError::GridSize { width: 4, .. })));
}

#[test]
fn test_invalid_kernel_source_reports_diagnostics() {
    let Some(gpu) = gpu() else { return };
    let config = KernelConfig::default()
        .with_label("Broken")
        .with_source("@fragment fn fs_main( -> @location(0) vec4<f32> {}");

    match KernelPipeline::build(&gpu.device, &config) {
        Err(LifeError::ShaderCompilation { kernel, message }) => {
            assert_eq!(kernel, "Broken");
            assert!(!message.is_empty());
        }
        Err(other) => panic!("unexpected error: {}", other),
        Ok(_) => panic!("broken kernel compiled"),
    }
}

#[test]
fn test_oversized_grid_rejected_before_allocation() {
    let Some(gpu) = gpu() else { return };
    let max = gpu.limits().max_texture_dimension_2d;
    let result = LifeSimulation::new(
        gpu.device.clone(),
        gpu.queue.clone(),
        &config((max + 1, 4), (64, 64)),
        TARGET_FORMAT,
        &CellGrid::new(max + 1, 4),
    );
    assert!(matches!(result, Err(LifeError::InvalidConfig(_))));
}
