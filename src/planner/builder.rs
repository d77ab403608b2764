//! Plan generation driver: argv parsing, repository layout, the
//! generation-then-plans sequencing and the all-or-nothing failure rules.

use crate::config::PlannerConfig;
use crate::planner::catalog::plan_catalog;
use crate::planner::descriptions::discover_package_names;
use crate::planner::error::PlanError;
use crate::planner::plan::TestPlan;
use crate::planner::pool::{run_generation_tasks, GenerationTask};
use crate::planner::writer::write_plan;
use std::fs;
use std::path::{Path, PathBuf};

pub struct PlanBuilder {
    pub test_root: PathBuf,
    pub out_dir: PathBuf,
    pub temp_dir: PathBuf,
    pub android_root: PathBuf,
    pub doclet_path: PathBuf,
    test_repository: PathBuf,
    plan_repository: PathBuf,
    planner_config: PlannerConfig,
    generation_tasks: Vec<GenerationTask>,
}

impl PlanBuilder {
    /// Build from raw argv (program name plus exactly 5 positional args).
    pub fn from_args(args: &[String]) -> Result<Self, PlanError> {
        if args.len() != 6 {
            return Err(PlanError::Usage);
        }
        Ok(Self::new(
            &args[1], &args[2], &args[3], &args[4], &args[5],
        ))
    }

    pub fn new(
        test_root: impl AsRef<Path>,
        out_dir: impl AsRef<Path>,
        temp_dir: impl AsRef<Path>,
        android_root: impl AsRef<Path>,
        doclet_path: impl AsRef<Path>,
    ) -> Self {
        let out_dir = out_dir.as_ref().to_path_buf();
        let test_repository = out_dir.join("repository/testcases");
        let plan_repository = out_dir.join("repository/plans");
        Self {
            test_root: test_root.as_ref().to_path_buf(),
            out_dir,
            temp_dir: temp_dir.as_ref().to_path_buf(),
            android_root: android_root.as_ref().to_path_buf(),
            doclet_path: doclet_path.as_ref().to_path_buf(),
            test_repository,
            plan_repository,
            planner_config: PlannerConfig {
                plan_version: "1.0".to_string(),
            },
            generation_tasks: Vec::new(),
        }
    }

    pub fn usage(prog: &str) -> String {
        format!(
            "Usage: {prog} <testRoot> <ctsOutputDir> <tempDir> <androidRootDir> <docletPath>\n\
             \n\
             testRoot:       Directory under which to search for tests.\n\
             ctsOutputDir:   Directory in which the repository should be created.\n\
             tempDir:        Directory to use for storing temporary files.\n\
             androidRootDir: Root directory of the source tree.\n\
             docletPath:     Class path where the description generator can be found.\n"
        )
    }

    pub fn set_planner_config(&mut self, config: PlannerConfig) {
        self.planner_config = config;
    }

    pub fn test_repository(&self) -> &Path {
        &self.test_repository
    }

    pub fn plan_repository(&self) -> &Path {
        &self.plan_repository
    }

    /// Register one description-generation unit of work. The build
    /// integration queues these; the pool runs them two at a time.
    pub fn queue_generation_task(&mut self, task: impl FnOnce() -> i32 + Send + 'static) {
        self.generation_tasks.push(Box::new(task));
    }

    /// Generate test descriptions for all queued packages and return the
    /// summed exit statuses. Any non-zero sum must halt plan generation.
    pub fn generate_descriptions(&mut self) -> Result<i32, PlanError> {
        let tasks = std::mem::take(&mut self.generation_tasks);
        log::info!("Generating test descriptions ({} tasks)", tasks.len());
        let status = run_generation_tasks(tasks)?;
        if status != 0 {
            log::error!("Description generation failed with aggregate status {status}");
        }
        Ok(status)
    }

    /// Generate the default test plans from the discovered packages.
    pub fn generate_plans(&self) -> Result<(), PlanError> {
        let packages = discover_package_names(&self.test_repository)?;
        log::info!(
            "Discovered {} test packages under {:?}",
            packages.len(),
            self.test_repository
        );

        fs::create_dir_all(&self.plan_repository)?;
        for spec in plan_catalog() {
            let mut plan = TestPlan::new(&packages);
            for directive in &spec.directives {
                plan.apply(directive)?;
            }
            self.write_plan(&plan, spec.name)?;
        }
        Ok(())
    }

    fn write_plan(&self, plan: &TestPlan, name: &str) -> Result<(), PlanError> {
        log::info!("Generating test plan {name}");
        let path = self.plan_repository.join(format!("{name}.xml"));
        write_plan(plan, &self.planner_config.plan_version, &path)
    }
}
