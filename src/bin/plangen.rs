use camcert::planner::PlanBuilder;
use camcert::CamcertConfig;
use std::env;
use std::process;

fn main() {
    camcert::init_logging();

    let args: Vec<String> = env::args().collect();
    let prog = args.first().map(String::as_str).unwrap_or("plangen");

    let mut builder = match PlanBuilder::from_args(&args) {
        Ok(builder) => builder,
        Err(_) => {
            eprint!("{}", PlanBuilder::usage(prog));
            process::exit(1);
        }
    };
    builder.set_planner_config(CamcertConfig::load_or_default().planner);

    // Description generation first; any worker failure aborts before a
    // single plan is written.
    let status = match builder.generate_descriptions() {
        Ok(status) => status,
        Err(e) => {
            eprintln!("description generation failed: {e}");
            process::exit(1);
        }
    };
    if status != 0 {
        process::exit(status);
    }

    if let Err(e) = builder.generate_plans() {
        eprintln!("plan generation failed: {e}");
        process::exit(1);
    }
}
