// Copyright 2020 TwoCookingMice

use std::env;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{mpsc, Arc};
use std::thread;

use indicatif::{ProgressBar, ProgressStyle};

use cooktorrance::core::bsdf::BSDF;
use cooktorrance::core::interaction::{SurfaceGeometry, TransportDirection};
use cooktorrance::core::rng::LcgRng;
use cooktorrance::core::scene_loader::load_materials;
use cooktorrance::math::constants::{Float, PI, Vector2f, Vector3f};
use cooktorrance::math::warp::direction_from_theta;

const INCIDENT_DEGREES: [Float; 4] = [0.0, 30.0, 60.0, 80.0];

struct FurnaceResult {
    bsdf: usize,
    theta_deg: Float,
    albedo: Vector3f,
    accepted: Float,
    pdf_integral: Float,
}

// White furnace estimate of the directional albedo and a check that the
// pdf integrates to the fraction of accepted samples.
fn run_furnace(bsdf: &dyn BSDF, theta_deg: Float, samples: usize, rng: &mut LcgRng) -> (Vector3f, Float, Float) {
    let geom = SurfaceGeometry::from_normal(&Vector3f::new(0.0, 0.0, 1.0), Vector2f::new(0.5, 0.5));
    let wi = direction_from_theta(theta_deg * PI / 180.0);

    let mut albedo = Vector3f::zeros();
    let mut accepted = 0usize;
    let mut pdf_sum = 0.0f64;
    for _ in 0..samples {
        if let Some(wo) = bsdf.sample_direction(rng.next_2d(), &geom, &wi) {
            accepted += 1;
            let pdf = bsdf.eval_direction_pdf(&geom, &wi, &wo);
            if pdf > 0.0 {
                let value = bsdf.eval_direction(&geom, &wi, &wo, TransportDirection::EyeToLight);
                albedo += (value / pdf).to_rgb();
            }
        }

        // Uniform in (theta, phi): pdf * cos_o * sin_o stays bounded at the horizon.
        let u = rng.next_2d();
        let theta = 0.5 * PI * u.x;
        let phi = 2.0 * PI * u.y;
        let (sin_theta, cos_theta) = theta.sin_cos();
        let wo = Vector3f::new(sin_theta * phi.cos(), sin_theta * phi.sin(), cos_theta);
        let pdf = bsdf.eval_direction_pdf(&geom, &wi, &wo);
        pdf_sum += (pdf * cos_theta * sin_theta * PI * PI) as f64;
    }

    let n = samples.max(1) as Float;
    (albedo / n, accepted as Float / n, (pdf_sum / samples.max(1) as f64) as Float)
}

fn main() {
    if env::var("RUST_LOG").is_err() {
        env::set_var("RUST_LOG", "info");
    }
    env_logger::init();

    let args: Vec<String> = env::args().collect();
    if args.len() < 2 {
        eprintln!("Usage: {} <materials.xml> [--samples N] [--seed N] [--bsdf ID]", args[0]);
        std::process::exit(1);
    }

    let input_path = &args[1];
    let mut samples: usize = 65536;
    let mut seed: u64 = 0;
    let mut bsdf_filter: Option<String> = None;

    let mut i = 2;
    while i < args.len() {
        match args[i].as_str() {
            "--samples" => {
                i += 1;
                samples = args.get(i).and_then(|v| v.parse::<usize>().ok()).unwrap_or(samples);
            }
            "--seed" => {
                i += 1;
                seed = args.get(i).and_then(|v| v.parse::<u64>().ok()).unwrap_or(0);
            }
            "--bsdf" => {
                i += 1;
                bsdf_filter = args.get(i).cloned();
            }
            other => log::warn!("Ignoring unknown argument {}.", other),
        }
        i += 1;
    }

    let library = match load_materials(input_path) {
        Ok(library) => library,
        Err(err) => {
            log::error!("Failed to load {}: {}", input_path, err);
            std::process::exit(1);
        }
    };

    let bsdfs: Vec<Arc<dyn BSDF>> = library.bsdfs().iter()
        .filter(|b| bsdf_filter.as_deref().map_or(true, |id| b.id() == id))
        .cloned()
        .collect();
    if bsdfs.is_empty() {
        log::error!("No bsdf to test in {}.", input_path);
        std::process::exit(1);
    }

    let jobs: Vec<(usize, Float)> = (0..bsdfs.len())
        .flat_map(|b| INCIDENT_DEGREES.iter().map(move |&theta| (b, theta)))
        .collect();
    let total_jobs = jobs.len();

    let progress = ProgressBar::new(total_jobs as u64);
    progress.set_style(
        ProgressStyle::with_template("[{elapsed_precise}] {bar:40.cyan/blue} {pos}/{len} runs")
            .unwrap_or_else(|_| ProgressStyle::default_bar()),
    );

    let next_job = Arc::new(AtomicUsize::new(0));
    let thread_count = thread::available_parallelism()
        .map(|n| n.get())
        .unwrap_or(1);
    let (tx, rx) = mpsc::channel::<FurnaceResult>();

    let mut results: Vec<FurnaceResult> = Vec::with_capacity(total_jobs);
    thread::scope(|scope| {
        for _ in 0..thread_count {
            let next_job = Arc::clone(&next_job);
            let tx = tx.clone();
            let jobs = &jobs;
            let bsdfs = &bsdfs;
            scope.spawn(move || {
                loop {
                    let job_index = next_job.fetch_add(1, Ordering::Relaxed);
                    if job_index >= jobs.len() {
                        break;
                    }
                    let (b, theta_deg) = jobs[job_index];
                    let mut rng = LcgRng::new((seed << 16) ^ job_index as u64);
                    let (albedo, accepted, pdf_integral) =
                        run_furnace(bsdfs[b].as_ref(), theta_deg, samples, &mut rng);
                    let result = FurnaceResult { bsdf: b, theta_deg, albedo, accepted, pdf_integral };
                    if tx.send(result).is_err() {
                        break;
                    }
                }
            });
        }
        drop(tx);

        for result in rx {
            progress.inc(1);
            results.push(result);
        }
    });
    progress.finish_and_clear();

    results.sort_by(|a, b| (a.bsdf, a.theta_deg as i32).cmp(&(b.bsdf, b.theta_deg as i32)));
    for result in results.iter() {
        let bsdf = &bsdfs[result.bsdf];
        log::info!("{} theta = {:>4.1}: albedo = ({:.4}, {:.4}, {:.4}), accepted = {:.4}, pdf integral = {:.4}",
                   bsdf.id(), result.theta_deg,
                   result.albedo.x, result.albedo.y, result.albedo.z,
                   result.accepted, result.pdf_integral);
        if (result.accepted - result.pdf_integral).abs() > 0.05 {
            log::warn!("{}: pdf does not match sampling at theta = {}.", bsdf.id(), result.theta_deg);
        }
    }
}
