use anyhow::Context;
use std::path::PathBuf;
use structopt::StructOpt;
use tluspy::{
    files::{self, *},
    run::{self, Executable},
    Config, Convergence, Parameters,
};

#[derive(Debug, StructOpt)]
#[structopt(name = "tluspy", about = "TLUSTY & SYNSPEC white dwarf atmosphere models")]
struct Opt {
    /// JSON configuration file
    #[structopt(short, long)]
    config: Option<PathBuf>,
    /// Working directory of the models
    #[structopt(short, long, default_value = ".")]
    workdir: PathBuf,
    #[structopt(subcommand)]
    cmd: Cmd,
}

#[derive(Debug, StructOpt)]
enum Cmd {
    /// Compiles TLUSTY with gfortran
    Build,
    /// Writes the TLUSTY control file fort.5
    Fort5 {
        teff: f64,
        log_g: f64,
        /// Keyword parameters file
        aux: String,
        /// Non-LTE model
        #[structopt(long)]
        nlte: bool,
        /// Starts from the model fort.8 instead of a gray model
        #[structopt(long)]
        restart: bool,
        #[structopt(long, default_value = "1000")]
        frequencies: u32,
        #[structopt(long, default_value = "9")]
        nlevels: u32,
    },
    /// Writes the keyword parameters file
    Aux { name: String, teff: f64, log_g: f64 },
    /// Writes the SYNSPEC wavelength range file fort.55
    Fort55 {
        /// Starting wavelength [A]
        w1: i64,
        /// Ending wavelength [A], negative for vacuum wavelengths
        #[structopt(allow_hyphen_values = true)]
        w2: i64,
        #[structopt(long, default_value = "0")]
        imode: i32,
        #[structopt(long, default_value = "0.01")]
        space: f64,
    },
    /// Writes the SYNSPEC abundance file fort.56 from an abundance table
    Fort56 {
        table: PathBuf,
        /// The table abundances are N/H, not log(N/H)
        #[structopt(long)]
        linear: bool,
        #[structopt(long, default_value = "30")]
        n_elems: u32,
    },
    /// Prints the abundances of an abundance table in number space
    Abundances {
        table: PathBuf,
        #[structopt(long)]
        linear: bool,
    },
    /// Copies a linelist to fort.19, or lists them
    Linelist { name: Option<String> },
    /// Runs TLUSTY or SYNSPEC
    Run { executable: Executable },
    /// Renames fort.7 into fort.8
    Promote,
    /// Writes the model atmosphere with a descriptive header
    Header {
        filename: String,
        star: String,
        teff: f64,
        log_g: f64,
        /// Abundance table
        table: Option<PathBuf>,
        /// Appends a timestamp to the file name
        #[structopt(long)]
        timestamp: bool,
    },
    /// Checks the convergence of a TLUSTY run
    Pconv {
        /// Figure file (.svg or .png)
        #[structopt(short, long)]
        plot: Option<PathBuf>,
        /// Figure title
        #[structopt(short, long)]
        title: Option<String>,
        /// Figure width [in]
        #[structopt(long, default_value = "14")]
        width: f64,
        /// Figure height [in]
        #[structopt(long, default_value = "10")]
        height: f64,
        /// Exports the convergence log as CSV
        #[structopt(long)]
        csv: Option<PathBuf>,
    },
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let opt = Opt::from_args();
    log::debug!("{:?}", opt);

    let config = match &opt.config {
        Some(path) => Config::from_path(path)?,
        None => Config::default(),
    };
    let workdir = opt.workdir.as_path();

    match opt.cmd {
        Cmd::Build => {
            let exe = run::build(&config)?;
            println!("TLUSTY compiled into {:?}", exe);
        }
        Cmd::Fort5 {
            teff,
            log_g,
            aux,
            nlte,
            restart,
            frequencies,
            nlevels,
        } => {
            ControlFile::new(teff as i64, log_g, aux, config.h1_data_path()?)
                .options(ControlOptions {
                    lte: !nlte,
                    ltgray: !restart,
                    frequencies,
                    nlevels,
                })
                .write_in(workdir)?;
        }
        Cmd::Aux { name, teff, log_g } => {
            AuxFile::new(name, teff, log_g, &config).write_in(workdir)?;
        }
        Cmd::Fort55 {
            w1,
            w2,
            imode,
            space,
        } => {
            SynspecFile::new(w1, w2)
                .options(SynspecOptions {
                    imode,
                    space,
                    ..Default::default()
                })
                .write_in(workdir)?;
        }
        Cmd::Fort56 {
            table,
            linear,
            n_elems,
        } => {
            let abundances = read_abn_file(&table, !linear)?;
            AbundanceFile::new(&abundances)?
                .n_elems(n_elems)
                .write_in(workdir)?;
        }
        Cmd::Abundances { table, linear } => {
            let abundances = read_abn_file(&table, !linear)?;
            println!("atm\tabn");
            for (z, abn) in abundances {
                println!("{}\t{}", z, tluspy::fortran::sci(abn, 3));
            }
        }
        Cmd::Linelist { name: Some(name) } => {
            files::get_linelist(&config, &name, workdir)?;
        }
        Cmd::Linelist { name: None } => {
            for linelist in files::linelists(&config)? {
                println!("{}", linelist.display());
            }
        }
        Cmd::Run { executable } => {
            run::run(executable, &config, workdir)
                .with_context(|| format!("{} run failed", executable))?;
        }
        Cmd::Promote => {
            files::promote_model(workdir)?;
        }
        Cmd::Header {
            filename,
            star,
            teff,
            log_g,
            table,
            timestamp,
        } => {
            let abundances = match table {
                Some(table) => read_abn_file(table, true)?,
                None => [(1, 1.)].into_iter().collect(),
            };
            let params = Parameters::new(
                star,
                teff,
                log_g,
                abundances.into_iter().map(|(z, abn)| (z as i64, abn)),
            );
            print!("{}", params);
            let mut header = SpectrumHeader::new(filename, &params, &config);
            if timestamp {
                header = header.timestamp_suffix();
            }
            let path = header.add_to_model(workdir)?;
            println!("Header added to {:?}", path);
        }
        Cmd::Pconv {
            plot,
            title,
            width,
            height,
            csv,
        } => {
            let convergence = Convergence::load(workdir)?;
            convergence.summary()?;
            if let Some(path) = csv {
                let file = std::fs::File::create(&path)
                    .with_context(|| format!("failed to create {:?}", path))?;
                convergence.log.to_csv(file)?;
            }
            if let Some(path) = plot {
                plot_convergence(&convergence, path, title, (width, height))?;
            }
        }
    }
    Ok(())
}

#[cfg(feature = "plot")]
fn plot_convergence(
    convergence: &Convergence,
    path: PathBuf,
    title: Option<String>,
    figsize: (f64, f64),
) -> anyhow::Result<()> {
    use tluspy::plot::{pconv, PlotOptions};
    pconv(convergence, path, &PlotOptions { title, figsize })?;
    Ok(())
}
#[cfg(not(feature = "plot"))]
fn plot_convergence(
    _convergence: &Convergence,
    _path: PathBuf,
    _title: Option<String>,
    _figsize: (f64, f64),
) -> anyhow::Result<()> {
    anyhow::bail!("tluspy is built without the `plot` feature")
}
