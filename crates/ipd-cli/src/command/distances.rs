use std::path::PathBuf;

use ipd_analysis::{
    sample::PlayerId,
    store::{DEFAULT_PAGE_SIZE, DistanceQuery, SortKey, SortOrder},
};

use crate::{
    schema::distances::DistancesResponse,
    util::{self, Output},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
enum SortColumn {
    Distance,
    Id,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
enum Order {
    Asc,
    Desc,
}

#[derive(Debug, Clone, clap::Args)]
pub(crate) struct DistancesArg {
    /// Path to the dataset JSON file
    dataset: PathBuf,
    /// Player whose distances are listed
    #[arg(long, value_parser = super::parse_player_id)]
    player: PlayerId,
    /// Page number, starting at 1
    #[arg(long, default_value_t = 1, value_parser = super::parse_positive)]
    page: usize,
    /// Rows per page
    #[arg(long, default_value_t = DEFAULT_PAGE_SIZE, value_parser = super::parse_positive)]
    page_size: usize,
    /// Column to sort by
    #[arg(long, value_enum, default_value_t = SortColumn::Distance)]
    sort: SortColumn,
    /// Sort direction
    #[arg(long, value_enum, default_value_t = Order::Asc)]
    order: Order,
    /// Output file path
    #[arg(long)]
    output: Option<PathBuf>,
}

impl DistancesArg {
    fn query(&self) -> DistanceQuery {
        DistanceQuery {
            sort: match self.sort {
                SortColumn::Distance => SortKey::Distance,
                SortColumn::Id => SortKey::Entity,
            },
            order: match self.order {
                Order::Asc => SortOrder::Ascending,
                Order::Desc => SortOrder::Descending,
            },
            page: self.page,
            page_size: self.page_size,
        }
    }
}

pub(crate) fn run(arg: &DistancesArg) -> anyhow::Result<()> {
    let store = util::read_dataset_file(&arg.dataset)?.to_store()?;
    let query = arg.query();
    tracing::debug!(player = %arg.player, ?query, "listing distances");

    let response = store
        .distances(arg.player, &query)
        .into_iter()
        .collect::<DistancesResponse>();
    Output::save_json(&response, arg.output.clone())
}
