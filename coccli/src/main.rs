use clap::{Args, Parser, Subcommand};
use cocsdk::{ClanSearch, Client, Config, Rankings};
use enum_dispatch::enum_dispatch;
use url::Url;

use crate::utils::{print_table, show};

mod utils;

#[derive(Parser)]
#[command(author, version)]
struct Cli {
    /// API token from the developer portal.
    #[arg(long, env = "COC_API_TOKEN", hide_env_values = true)]
    token: String,
    /// Alternative API root, e.g. a proxy.
    #[arg(long, env = "COC_API_URL")]
    url: Option<Url>,
    /// Log requests to stderr.
    #[arg(short, long)]
    verbose: bool,
    #[command(subcommand)]
    command: Commands,
}

#[enum_dispatch]
trait Run {
    async fn run(&self, client: &Client) -> anyhow::Result<()>;
}

#[derive(Subcommand)]
#[enum_dispatch(Run)]
enum Commands {
    /// Show a clan and its members
    Clan(ClanCmd),
    /// Search clans by name
    Search(SearchCmd),
    /// Show a clan's current war
    War(WarCmd),
    /// List a clan's finished wars
    WarLog(WarLogCmd),
    /// Show a player's profile
    Player(PlayerCmd),
    /// List locations
    Locations(LocationsCmd),
    /// Show clan or player rankings for a location
    Rankings(RankingsCmd),
    /// List trophy leagues
    Leagues(LeaguesCmd),
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let _ = dotenvy::dotenv();
    let args = Cli::parse();

    if args.verbose {
        let _ = simple_logger::init_with_level(log::Level::Debug);
    }

    let mut config = Config::new(args.token);
    if let Some(url) = args.url {
        config = config.with_url(url);
    }
    let client = Client::from_config(config);

    args.command.run(&client).await
}

#[derive(Args)]
struct ClanCmd {
    /// Clan tag, e.g. `#2PP`.
    tag: String,
}

impl Run for ClanCmd {
    async fn run(&self, client: &Client) -> anyhow::Result<()> {
        let clan = client.clan(&self.tag).await?;

        println!("{} {}", show(clan.tag()?), show(clan.name()?));
        println!("level:    {}", show(clan.clan_level()?));
        println!("points:   {}", show(clan.clan_points()?));
        println!(
            "location: {}",
            show(clan.location()?.map(|l| l.name()).transpose()?.flatten())
        );
        println!(
            "wars:     {} won / {} tied / {} lost, streak {}",
            show(clan.war_wins()?),
            show(clan.war_ties()?),
            show(clan.war_losses()?),
            show(clan.war_win_streak()?),
        );
        println!("members:  {}\n", show(clan.members_count()?));

        let Some(members) = clan.member_list()? else {
            return Ok(());
        };
        let mut rows = Vec::with_capacity(members.len());
        for member in members {
            rows.push(format!(
                "{}\t{}\t{}\t{}\t{}\t{}",
                show(member.clan_rank()?),
                show(member.tag()?),
                show(member.name()?),
                show(member.role()?),
                show(member.trophies()?),
                show(member.donations()?),
            ));
        }
        print_table("rank\ttag\tname\trole\ttrophies\tdonations", rows)
    }
}

#[derive(Args)]
struct SearchCmd {
    /// Clan name, at least three characters.
    name: String,
    /// Maximum number of results.
    #[arg(short, long, default_value_t = 20)]
    limit: u32,
    #[arg(long)]
    min_members: Option<u32>,
    /// Location id.
    #[arg(long)]
    location: Option<u64>,
}

impl Run for SearchCmd {
    async fn run(&self, client: &Client) -> anyhow::Result<()> {
        let mut search = ClanSearch::new().name(&self.name).limit(self.limit);
        if let Some(count) = self.min_members {
            search = search.min_members(count);
        }
        if let Some(id) = self.location {
            search = search.location_id(id);
        }

        let mut rows = Vec::new();
        for clan in client.clans(search).await? {
            rows.push(format!(
                "{}\t{}\t{}\t{}\t{}",
                show(clan.tag()?),
                show(clan.name()?),
                show(clan.clan_level()?),
                show(clan.members_count()?),
                show(clan.clan_points()?),
            ));
        }
        print_table("tag\tname\tlevel\tmembers\tpoints", rows)
    }
}

#[derive(Args)]
struct WarCmd {
    tag: String,
}

impl Run for WarCmd {
    async fn run(&self, client: &Client) -> anyhow::Result<()> {
        let war = client.clan_current_war(&self.tag).await?;
        println!("state: {}", show(war.state()?));
        if !war.is_in_war()? {
            return Ok(());
        }
        println!("ends:  {}\n", show(war.end_time()?));

        let mut rows = Vec::new();
        for side in [war.clan()?, war.opponent()?].into_iter().flatten() {
            rows.push(format!(
                "{}\t{}\t{}\t{}\t{}",
                show(side.tag()?),
                show(side.name()?),
                show(side.stars()?),
                show(side.destruction_percentage()?),
                show(side.attacks()?),
            ));
        }
        print_table("tag\tname\tstars\tdestruction\tattacks", rows)
    }
}

#[derive(Args)]
struct WarLogCmd {
    tag: String,
}

impl Run for WarLogCmd {
    async fn run(&self, client: &Client) -> anyhow::Result<()> {
        let mut rows = Vec::new();
        for war in client.clan_war_log(&self.tag).await? {
            let opponent = war.opponent()?;
            rows.push(format!(
                "{}\t{}\t{}\t{}\t{}",
                show(war.end_time()?.map(|t| t.date_naive())),
                show(war.result()?),
                show(war.team_size()?),
                show(war.clan()?.map(|c| c.stars()).transpose()?.flatten()),
                show(opponent.map(|c| c.name()).transpose()?.flatten()),
            ));
        }
        print_table("date\tresult\tsize\tstars\topponent", rows)
    }
}

#[derive(Args)]
struct PlayerCmd {
    tag: String,
}

impl Run for PlayerCmd {
    async fn run(&self, client: &Client) -> anyhow::Result<()> {
        let player = client.player(&self.tag).await?;

        println!("{} {}", show(player.tag()?), show(player.name()?));
        println!("town hall: {}", show(player.town_hall_level()?));
        println!("trophies:  {} (best {})", show(player.trophies()?), show(player.best_trophies()?));
        println!("war stars: {}", show(player.war_stars()?));
        println!(
            "league:    {}",
            show(player.league()?.map(|l| l.name()).transpose()?.flatten())
        );
        println!(
            "clan:      {}\n",
            show(player.clan()?.map(|c| c.name()).transpose()?.flatten())
        );

        let mut rows = Vec::new();
        for (kind, units) in [
            ("hero", player.heroes()?),
            ("troop", player.troops()?),
            ("spell", player.spells()?),
        ] {
            for unit in units.unwrap_or_default() {
                rows.push(format!(
                    "{kind}\t{}\t{}\t{}\t{}",
                    show(unit.name()?),
                    show(unit.village()?),
                    show(unit.level()?),
                    show(unit.max_level()?),
                ));
            }
        }
        print_table("kind\tname\tvillage\tlevel\tmax", rows)
    }
}

#[derive(Args)]
struct LocationsCmd;

impl Run for LocationsCmd {
    async fn run(&self, client: &Client) -> anyhow::Result<()> {
        let mut rows = Vec::new();
        for location in client.locations().await? {
            rows.push(format!(
                "{}\t{}\t{}",
                show(location.id()?),
                show(location.name()?),
                show(location.country_code()?),
            ));
        }
        print_table("id\tname\tcountry", rows)
    }
}

#[derive(Args)]
struct RankingsCmd {
    /// Location id or `global`.
    location: String,
    /// Ranking id: `clans`, `players`, ...
    #[arg(default_value = "clans")]
    ranking: String,
    /// Number of entries to show.
    #[arg(short, long, default_value_t = 25)]
    top: usize,
}

impl Run for RankingsCmd {
    async fn run(&self, client: &Client) -> anyhow::Result<()> {
        let mut rows = Vec::new();
        match client.rankings(&self.location, &self.ranking).await? {
            Rankings::Clans(clans) => {
                for clan in clans.iter().take(self.top) {
                    rows.push(format!(
                        "{}\t{}\t{}\t{}",
                        show(clan.rank()?),
                        show(clan.tag()?),
                        show(clan.name()?),
                        show(clan.clan_points()?),
                    ));
                }
            }
            Rankings::Players(players) => {
                for player in players.iter().take(self.top) {
                    rows.push(format!(
                        "{}\t{}\t{}\t{}",
                        show(player.rank()?),
                        show(player.tag()?),
                        show(player.name()?),
                        show(player.trophies()?),
                    ));
                }
            }
        }
        print_table("rank\ttag\tname\tscore", rows)
    }
}

#[derive(Args)]
struct LeaguesCmd;

impl Run for LeaguesCmd {
    async fn run(&self, client: &Client) -> anyhow::Result<()> {
        let mut rows = Vec::new();
        for league in client.leagues().await? {
            rows.push(format!("{}\t{}", show(league.id()?), show(league.name()?)));
        }
        print_table("id\tname", rows)
    }
}
