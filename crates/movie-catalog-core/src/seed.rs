use movie_catalog_models::{Category, NewMovie, Rating};

struct SeedEntry {
    title: &'static str,
    description: &'static str,
    year: u16,
    category: Category,
    rating: Rating,
    duration: u32,
    director: &'static str,
    cast: &'static [&'static str],
    imdb_rating: f32,
    poster: &'static str,
}

const SEED: &[SeedEntry] = &[
    SeedEntry {
        title: "The Matrix",
        description: "Neo, a disillusioned hacker, discovers that his world is a simulated prison designed to subdue humanity. Guided by Morpheus and Trinity, he must learn to bend the rules of reality and confront the intelligent machines that control it, embracing a destiny that challenges the nature of truth, choice, and freedom.",
        year: 1999,
        category: Category::SciFi,
        rating: Rating::R,
        duration: 136,
        director: "The Wachowskis",
        cast: &["Keanu Reeves", "Laurence Fishburne", "Carrie-Anne Moss"],
        imdb_rating: 8.7,
        poster: "https://th.bing.com/th/id/R.f481ebb82183b07b0fea1570bc6c85b9?rik=JWyXrAh0k%2f4V9Q&riu=http%3a%2f%2fsparkviews.com%2fwp-content%2fuploads%2f2017%2f09%2fThe-Matrix-1999.jpg&ehk=DMlSNMig7crkWBUtA5qo7mrLwqF4mX9Uoq%2bHRYO9Vgs%3d&risl=&pid=ImgRaw&r=0",
    },
    SeedEntry {
        title: "Inception",
        description: "Dom Cobb is a thief who infiltrates the subconscious during the dream state to steal secrets. When offered a chance to erase his criminal history, he must attempt the near-impossible: inception—planting an idea into a target’s mind—while navigating collapsing dream layers and the ghosts of his past.",
        year: 2010,
        category: Category::SciFi,
        rating: Rating::Pg13,
        duration: 148,
        director: "Christopher Nolan",
        cast: &["Leonardo DiCaprio", "Marion Cotillard", "Tom Hardy"],
        imdb_rating: 8.8,
        poster: "https://tse3.mm.bing.net/th/id/OIP.ZFII9D-wnbPdcWdzFeuEiAHaHa?rs=1&pid=ImgDetMain&o=7&rm=3",
    },
    SeedEntry {
        title: "Dune: Part Two",
        description: "Paul Atreides unites with the Fremen on Arrakis to wage war against the conspirators who destroyed his family. As he embraces visions of the future and his growing power, Paul faces a wrenching choice between the love of his life and the fate of the known universe.",
        year: 2024,
        category: Category::SciFi,
        rating: Rating::Pg13,
        duration: 166,
        director: "Denis Villeneuve",
        cast: &["Timothée Chalamet", "Zendaya", "Rebecca Ferguson"],
        imdb_rating: 8.6,
        poster: "image.tmdb.org/t/p/w500/1pdfLvkbY9ohJlCjQH2CZjjYVvJ.jpg",
    },
    SeedEntry {
        title: "Oppenheimer",
        description: "A portrait of J. Robert Oppenheimer, the brilliant physicist whose leadership of the Manhattan Project ushered in the atomic age. The film explores the moral and political fallout of scientific discovery as Oppenheimer grapples with the consequences of unleashing unprecedented destructive power.",
        year: 2023,
        category: Category::Biography,
        rating: Rating::R,
        duration: 180,
        director: "Christopher Nolan",
        cast: &["Cillian Murphy", "Emily Blunt", "Matt Damon"],
        imdb_rating: 8.9,
        poster: "https://tse2.mm.bing.net/th/id/OIP.fZoBEzk6so-Pj033wxwmNwHaLH?rs=1&pid=ImgDetMain&o=7&rm=3",
    },
    SeedEntry {
        title: "The Dark Knight",
        description: "When the Joker plunges Gotham into chaos, Batman faces his most formidable adversary—one who seeks to prove that anyone can fall. As the Caped Crusader pushes his own moral boundaries, alliances are tested and the true cost of heroism becomes painfully clear.",
        year: 2008,
        category: Category::Action,
        rating: Rating::Pg13,
        duration: 152,
        director: "Christopher Nolan",
        cast: &["Christian Bale", "Heath Ledger", "Aaron Eckhart"],
        imdb_rating: 9.0,
        poster: "https://tse4.mm.bing.net/th/id/OIP.NN9rKH-vZbFgtH4FuoW7OwHaLH?rs=1&pid=ImgDetMain&o=7&rm=3",
    },
    SeedEntry {
        title: "Superbad",
        description: "Best friends Seth and Evan embark on one last chaotic night before graduation, hoping to leave their awkward high school years with a bang. Between fake IDs, police run-ins, and heartfelt confessions, they discover what their friendship really means as they prepare to grow up.",
        year: 2007,
        category: Category::Comedy,
        rating: Rating::R,
        duration: 113,
        director: "Greg Mottola",
        cast: &["Jonah Hill", "Michael Cera", "Christopher Mintz-Plasse"],
        imdb_rating: 7.6,
        poster: "https://upload.wikimedia.org/wikipedia/en/8/8b/Superbad_Poster.png",
    },
    SeedEntry {
        title: "The Shawshank Redemption",
        description: "Wrongly convicted banker Andy Dufresne forms an unlikely friendship with lifer Red within the oppressive walls of Shawshank State Penitentiary. Over decades, hope becomes their quiet rebellion as Andy engineers a path to redemption that inspires everyone around him.",
        year: 1994,
        category: Category::Drama,
        rating: Rating::R,
        duration: 142,
        director: "Frank Darabont",
        cast: &["Tim Robbins", "Morgan Freeman"],
        imdb_rating: 9.3,
        poster: "upload.wikimedia.org/wikipedia/en/8/81/ShawshankRedemptionMoviePoster.jpg",
    },
    SeedEntry {
        title: "The Conjuring",
        description: "Paranormal investigators Ed and Lorraine Warren confront a malevolent presence terrorizing a family in their secluded farmhouse. Based on a real case, the Warrens face escalating horrors as the entity tightens its grip on the home and its inhabitants.",
        year: 2013,
        category: Category::Horror,
        rating: Rating::R,
        duration: 112,
        director: "James Wan",
        cast: &["Vera Farmiga", "Patrick Wilson", "Lili Taylor"],
        imdb_rating: 7.5,
        poster: "https://th.bing.com/th/id/OIP.G2TywyeaWaTsKz1le9T_aAAAAA?o=7rm=3&rs=1&pid=ImgDetMain&o=7&rm=3",
    },
    SeedEntry {
        title: "How to Lose a Guy in 10 Days",
        description: "Magazine writer Andie Anderson sets out to deliberately drive away a man in ten days for an article, while advertising executive Benjamin Barry bets he can make any woman fall in love with him in the same time. Their clashing agendas ignite a battle of wits that turns unexpectedly heartfelt.",
        year: 2003,
        category: Category::Romance,
        rating: Rating::Pg13,
        duration: 116,
        director: "Donald Petrie",
        cast: &["Kate Hudson", "Matthew McConaughey"],
        imdb_rating: 6.5,
        poster: "https://th.bing.com/th/id/R.af793875a5a6398d7f8841f842670240?rik=x4WkGfQrykIfng&riu=http%3a%2f%2fimages.moviepostershop.com%2fhow-to-lose-a-guy-in-10-days-movie-poster-2003-1020201634.jpg&ehk=AlG4Xfp1J1M59jqGV1F2jBFA5xeKV3JL0TyB3CVa%2bAo%3d&risl=&pid=ImgRaw&r=0",
    },
    SeedEntry {
        title: "Se7en",
        description: "Veteran detective Somerset and his impulsive new partner Mills hunt a serial killer who uses the seven deadly sins as meticulous inspiration for murder. Their pursuit descends into a grim moral labyrinth culminating in an unforgettable reckoning.",
        year: 1995,
        category: Category::Thriller,
        rating: Rating::R,
        duration: 127,
        director: "David Fincher",
        cast: &["Brad Pitt", "Morgan Freeman", "Kevin Spacey"],
        imdb_rating: 8.6,
        poster: "https://th.bing.com/th/id/OIP.ds9lA_mUC3OS5YwW71yg2gHaKu?o=7rm=3&rs=1&pid=ImgDetMain&o=7&rm=3",
    },
    SeedEntry {
        title: "Free Solo",
        description: "Climber Alex Honnold attempts to scale Yosemite’s El Capitan without ropes, confronting not only a sheer granite monolith but also the limits of human focus, fear, and discipline. This documentary captures a rare blend of athleticism, obsession, and vulnerability.",
        year: 2018,
        category: Category::Documentary,
        rating: Rating::Pg13,
        duration: 100,
        director: "Elizabeth Chai Vasarhelyi, Jimmy Chin",
        cast: &["Alex Honnold"],
        imdb_rating: 8.2,
        poster: "https://media0084.elcinema.com/uploads/_320x_bcc37436b534db4ebba4a735e0afe6489c19c8d58b1930d8e828056fc179c12c.jpg",
    },
    SeedEntry {
        title: "Toy Story",
        description: "When a flashy new space ranger upends the bedroom hierarchy, cowboy doll Woody must confront jealousy and change. As Woody and Buzz are thrust into a larger world, they discover the power of friendship and the courage to accept new beginnings.",
        year: 1995,
        category: Category::Animation,
        rating: Rating::G,
        duration: 81,
        director: "John Lasseter",
        cast: &["Tom Hanks", "Tim Allen"],
        imdb_rating: 8.3,
        poster: "upload.wikimedia.org/wikipedia/en/1/13/Toy_Story.jpg",
    },
    SeedEntry {
        title: "The Lord of the Rings: The Fellowship of the Ring",
        description: "A humble hobbit inherits a ring of unimaginable power and joins a fellowship tasked with its destruction. Their perilous journey across Middle-earth forges bonds, tests resolve, and sets the stage for a battle against encroaching darkness.",
        year: 2001,
        category: Category::Adventure,
        rating: Rating::Pg13,
        duration: 178,
        director: "Peter Jackson",
        cast: &["Elijah Wood", "Ian McKellen", "Viggo Mortensen"],
        imdb_rating: 8.8,
        poster: "https://upload.wikimedia.org/wikipedia/en/f/fb/Lord_Rings_Fellowship_Ring.jpg",
    },
];

/// Built-in starter catalog used when the store is empty
pub fn seed_movies() -> Vec<NewMovie> {
    SEED.iter()
        .map(|entry| NewMovie {
            title: entry.title.to_string(),
            description: entry.description.to_string(),
            release_year: entry.year,
            category: entry.category,
            rating: entry.rating,
            duration: Some(entry.duration),
            director: Some(entry.director.to_string()),
            cast: Some(entry.cast.iter().map(|name| name.to_string()).collect()),
            imdb_rating: Some(entry.imdb_rating),
            poster_url: Some(entry.poster.to_string()),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::poster::PosterPolicy;
    use std::collections::HashSet;

    #[test]
    fn test_seed_titles_unique_and_valid() {
        let seed = seed_movies();
        assert_eq!(seed.len(), 13);

        let titles: HashSet<_> = seed.iter().map(|m| m.title.as_str()).collect();
        assert_eq!(titles.len(), seed.len());
        assert!(seed.iter().all(|m| m.release_year >= 1888));
        assert!(seed.iter().all(|m| m.poster_url.is_some()));
    }

    #[test]
    fn test_seed_posters_keep_their_encoded_queries_through_the_proxy() {
        let policy = PosterPolicy::default();
        let matrix = &seed_movies()[0];
        assert_eq!(matrix.title, "The Matrix");

        let proxied = policy.normalize_or_fallback(matrix.poster_url.as_deref());
        assert!(proxied.starts_with("https://images.weserv.nl/?url=th.bing.com%2Fth%2Fid%2FR.f481ebb8"));
        // the already-encoded `riu` target is encoded once more, not decoded
        assert!(proxied.contains("riu%3Dhttp%253a%252f%252fsparkviews.com"));
        assert_eq!(policy.normalize_or_fallback(Some(proxied.as_str())), proxied);

        let dune = policy.normalize_or_fallback(seed_movies()[2].poster_url.as_deref());
        assert_eq!(
            dune,
            "https://images.weserv.nl/?url=image.tmdb.org%2Ft%2Fp%2Fw500%2F1pdfLvkbY9ohJlCjQH2CZjjYVvJ.jpg"
        );
    }
}
