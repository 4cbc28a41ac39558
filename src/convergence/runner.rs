//! The convergence tester.
//!
//! For each resolution exponent p the tester builds a `2^p` grid, samples
//! the test functions, applies the numerical operator to the trimmed field
//! and compares every channel against the exact RHS sampled on the same
//! interior nodes. Errors are then fitted in log-log space.

use ndarray::{Array3, s};

use super::fit::{log_log_slope, relative_l2_error};
use super::{ConvergenceConfig, ConvergenceError, ConvergenceReport, SingleConvergenceReport};
use crate::backend::{HostGrid, VoxelGrid};
use crate::grid::{GridError, VoxelFields};
use crate::operators::RhsOperator;
use crate::symbolic::Expr;
use crate::types::{BackendKind, Precision};

// =============================================================================
// Public entry points
// =============================================================================

/// Run a convergence study of operator `O` on the engine chosen by `config`.
///
/// # Arguments
///
/// * `params` - Operator parameters, passed to `O::new` at every resolution
/// * `test_functions` - One analytic function per field channel
/// * `config` - Convention, precision, resolutions and engine
///
/// # Errors
///
/// Fails on an invalid configuration, an empty function list, an engine that
/// is not compiled in, or any grid/operator error along the way. A zero
/// error at some step is not an error: it yields a non-finite slope, see
/// [`ConvergenceReport::check_fit`].
///
/// # Example
///
/// ```
/// use std::f64::consts::PI;
/// use vox_rs::convergence::{ConvergenceConfig, rhs_convergence_test};
/// use vox_rs::operators::{Diffusion, DiffusionParams};
/// use vox_rs::symbolic::Expr;
/// use vox_rs::types::Precision;
///
/// let f = (2.0 * PI * Expr::x()).sin();
/// let config = ConvergenceConfig::default()
///     .with_precision(Precision::Float64)
///     .with_powers(vec![3, 4, 5]);
/// let report =
///     rhs_convergence_test::<Diffusion>(&DiffusionParams::new(1.0), &[f], &config).unwrap();
/// assert!((report.slopes[0] - 2.0).abs() < 0.2);
/// ```
pub fn rhs_convergence_test<O: RhsOperator>(
    params: &O::Params,
    test_functions: &[Expr],
    config: &ConvergenceConfig,
) -> Result<ConvergenceReport, ConvergenceError> {
    match (config.backend, config.precision) {
        (BackendKind::Host, Precision::Float32) => {
            rhs_convergence_test_on::<HostGrid<f32>, O>(params, test_functions, config)
        }
        (BackendKind::Host, Precision::Float64) => {
            rhs_convergence_test_on::<HostGrid<f64>, O>(params, test_functions, config)
        }
        #[cfg(feature = "burn-ndarray")]
        (BackendKind::Burn, Precision::Float32) => {
            use crate::backend::burn_grid::BurnGrid;
            rhs_convergence_test_on::<BurnGrid<burn_ndarray::NdArray<f32>>, O>(
                params,
                test_functions,
                config,
            )
        }
        #[cfg(feature = "burn-ndarray")]
        (BackendKind::Burn, Precision::Float64) => {
            use crate::backend::burn_grid::BurnGrid;
            rhs_convergence_test_on::<BurnGrid<burn_ndarray::NdArray<f64>>, O>(
                params,
                test_functions,
                config,
            )
        }
        #[cfg(feature = "burn-wgpu")]
        (BackendKind::BurnWgpu, Precision::Float32) => {
            use crate::backend::burn_grid::BurnGrid;
            rhs_convergence_test_on::<BurnGrid<burn_wgpu::Wgpu>, O>(
                params,
                test_functions,
                config,
            )
        }
        (backend, precision) => Err(GridError::BackendUnavailable(format!(
            "{} with {} is not available in this build",
            backend, precision
        ))
        .into()),
    }
}

/// Single-function form of [`rhs_convergence_test`].
pub fn rhs_convergence_test_single<O: RhsOperator>(
    params: &O::Params,
    test_function: &Expr,
    config: &ConvergenceConfig,
) -> Result<SingleConvergenceReport, ConvergenceError> {
    rhs_convergence_test::<O>(params, std::slice::from_ref(test_function), config)
        .map(ConvergenceReport::into_single)
}

/// Run a convergence study on an explicit engine type.
///
/// `config.backend` and `config.precision` are ignored; the engine `G`
/// decides both.
pub fn rhs_convergence_test_on<G: VoxelGrid, O: RhsOperator>(
    params: &O::Params,
    test_functions: &[Expr],
    config: &ConvergenceConfig,
) -> Result<ConvergenceReport, ConvergenceError> {
    config.validate()?;
    if test_functions.is_empty() {
        return Err(ConvergenceError::InvalidConfig(
            "at least one test function is required".to_string(),
        ));
    }

    let n_funcs = test_functions.len();
    let mut spacings = Vec::with_capacity(config.powers.len());
    let mut errors = vec![Vec::with_capacity(config.powers.len()); n_funcs];
    let mut declared = None;

    for &p in &config.powers {
        let n = 1usize << p;
        let step = run_step::<G, O>(params, test_functions, config, n)?;

        log::debug!(
            "{} on {} {} ({}): N={} h={:.4e} errors={:?}",
            step.operator,
            step.engine,
            step.precision,
            config.convention,
            n,
            step.spacing,
            step.errors
        );

        spacings.push(step.spacing);
        for (j, e) in step.errors.into_iter().enumerate() {
            errors[j].push(e);
        }
        declared = Some((step.operator, step.order, step.precision));
    }

    let (operator, declared_order, precision) = declared.ok_or_else(|| {
        ConvergenceError::InvalidConfig("no resolution steps were run".to_string())
    })?;

    let slopes: Vec<f64> = errors
        .iter()
        .map(|e| log_log_slope(&spacings, e))
        .collect();

    for (f, slope) in test_functions.iter().zip(&slopes) {
        if !slope.is_finite() {
            log::warn!(
                "{}: non-finite convergence slope for {} (zero or non-finite error at some resolution)",
                operator,
                f
            );
        }
    }
    log::info!(
        "{} convergence ({}, {}): slopes {:?}, declared order {}",
        operator,
        config.convention,
        precision,
        slopes,
        declared_order
    );

    Ok(ConvergenceReport {
        operator: operator.to_string(),
        functions: test_functions.iter().map(|f| f.to_string()).collect(),
        spacings,
        errors,
        slopes,
        declared_order,
    })
}

// =============================================================================
// One resolution step
// =============================================================================

struct StepResult {
    operator: &'static str,
    engine: &'static str,
    precision: Precision,
    order: u32,
    spacing: f64,
    errors: Vec<f64>,
}

fn run_step<G: VoxelGrid, O: RhsOperator>(
    params: &O::Params,
    test_functions: &[Expr],
    config: &ConvergenceConfig,
    n: usize,
) -> Result<StepResult, ConvergenceError> {
    let convention = config.convention;
    let vf = VoxelFields::new(convention.resolution(n), config.extent, convention)?;
    let grid = G::create(vf.grid_info())?;
    let mesh = vf.meshgrid();

    let fields = test_functions
        .iter()
        .map(|f| grid.init_scalar_field(&f.sample(&mesh)))
        .collect::<Result<Vec<_>, _>>()?;
    let u = grid.trim_boundary_nodes(&grid.concatenate(fields));

    let op = O::new(&grid, params)?;
    op.check_field_count(test_functions.len())?;
    let numeric = op.rhs(&grid, &u, config.time)?;
    let exact = op.rhs_analytic(test_functions, config.time)?;

    if exact.len() != test_functions.len() {
        return Err(ConvergenceError::ChannelMismatch {
            expected: test_functions.len(),
            actual: exact.len(),
        });
    }
    let channels = grid.n_channels(&numeric);
    if channels != test_functions.len() {
        return Err(ConvergenceError::ChannelMismatch {
            expected: test_functions.len(),
            actual: channels,
        });
    }

    let layers = convention.trimmed_layers();
    let errors = exact
        .iter()
        .enumerate()
        .map(|(j, g)| {
            let computed = grid.export_scalar_field(&grid.channel(&numeric, j))?;
            let reference = trim_layers(g.sample(&mesh), layers);
            Ok(relative_l2_error(&computed, &reference)?)
        })
        .collect::<Result<Vec<f64>, ConvergenceError>>()?;

    Ok(StepResult {
        operator: op.name(),
        engine: grid.name(),
        precision: grid.precision(),
        order: op.order(),
        spacing: vf.spacing()[0],
        errors,
    })
}

/// Drop `layers[a]` samples from both ends of each axis.
fn trim_layers(data: Array3<f64>, layers: [usize; 3]) -> Array3<f64> {
    if layers == [0, 0, 0] {
        return data;
    }
    let (nx, ny, nz) = data.dim();
    data.slice(s![
        layers[0]..nx - layers[0],
        layers[1]..ny - layers[1],
        layers[2]..nz - layers[2]
    ])
    .to_owned()
}
